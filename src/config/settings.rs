//! Configuration types and loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cli::EngineKind;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "shorts.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub voice: VoiceConfig,
    pub video: VideoConfig,
    pub email: EmailConfig,
}

/// Input and output locations, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub music_dir: PathBuf,
    pub approved_script: PathBuf,
    pub audio_dir: PathBuf,
    pub video_dir: PathBuf,
    pub scripts_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("assets_library/music"),
            approved_script: PathBuf::from("human_input/script_approved.txt"),
            audio_dir: PathBuf::from("output/audio"),
            video_dir: PathBuf::from("output/videos"),
            scripts_file: PathBuf::from("scripts.json"),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceConfig {
    /// Engines tried in order.
    pub engines: Vec<EngineKind>,
    pub edge_voices: Vec<String>,
    pub espeak_voice: String,
    pub pico_language: String,
    /// Speaking rate offset in percent (+10 = 10% faster).
    pub rate_percent: i32,
    /// Attempts per engine voice.
    pub attempts: u32,
    /// Smallest output accepted as a real synthesis.
    pub min_bytes: u64,
    /// Shortest WAV output accepted, in seconds.
    pub min_seconds: f64,
    pub fallback_chars_per_second: f64,
    pub fallback_min_seconds: f64,
    pub fallback_sample_rate: u32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            engines: vec![EngineKind::Edge, EngineKind::Espeak, EngineKind::Pico],
            edge_voices: vec![
                "fr-FR-DeniseNeural".to_string(),
                "fr-FR-HenriNeural".to_string(),
            ],
            espeak_voice: "fr".to_string(),
            pico_language: "fr-FR".to_string(),
            rate_percent: 10,
            attempts: 2,
            min_bytes: 1024,
            min_seconds: 0.5,
            fallback_chars_per_second: 15.0,
            fallback_min_seconds: 10.0,
            fallback_sample_rate: 22050,
        }
    }
}

/// Video composition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Gain applied to the background music.
    pub music_volume: f64,
    /// Title shown when the approved script has none.
    pub title: String,
    pub title_seconds: f64,
    pub countdown_max_seconds: f64,
    pub title_font_size: u32,
    pub countdown_font_size: u32,
    pub font_file: Option<PathBuf>,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 24,
            music_volume: 0.3,
            title: "3 RÉVÉLATIONS SURPRENANTES".to_string(),
            title_seconds: 5.0,
            countdown_max_seconds: 2.0,
            title_font_size: 70,
            countdown_font_size: 300,
            font_file: None,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// Approval email settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmailConfig {
    pub from: String,
    pub to: String,
    pub api_url: String,
    /// Link behind each "choose this script" button.
    pub approval_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "shorts@example.com".to_string(),
            to: "review@example.com".to_string(),
            api_url: "https://api.sendgrid.com/v3/mail/send".to_string(),
            approval_url: "https://github.com/".to_string(),
            api_key_env: "SENDGRID_API_KEY".to_string(),
        }
    }
}

impl EmailConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the discovered file is used,
    /// or the defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::from_path(path);
        }

        match Self::discover_path() {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Find a config file: `./shorts.toml`, then the user config directory.
    pub fn discover_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        Self::user_config_path().filter(|path| path.exists())
    }

    /// Location of the per-user config file.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shorts-assembly").join("config.toml"))
    }
}
