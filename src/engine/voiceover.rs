//! Voiceover generation with engine fallback.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{self, AudioError};
use crate::config::VoiceConfig;
use crate::speech::{SpeechEngine, SpeechError, SpeechRequest};

/// Engine label recorded for the silent placeholder.
pub const PLACEHOLDER_ENGINE: &str = "silent placeholder";

/// Errors that can occur during voiceover generation.
#[derive(Error, Debug)]
pub enum VoiceoverError {
    #[error("Nothing to synthesize: text is empty")]
    EmptyText,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Placeholder audio failed: {0}")]
    Placeholder(#[from] AudioError),
}

/// Why a synthesized file was rejected.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("output file was not created")]
    Missing,

    #[error("output too small: {size} bytes (minimum {min})")]
    TooSmall { size: u64, min: u64 },

    #[error("output too short: {seconds:.2}s (minimum {min:.2}s)")]
    TooShort { seconds: f64, min: f64 },

    #[error("unreadable WAV: {0}")]
    Unreadable(#[from] AudioError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A generated voiceover file.
#[derive(Debug, Clone, PartialEq)]
pub struct Voiceover {
    pub path: PathBuf,
    pub engine: String,
    pub voice: Option<String>,
    /// True when every engine failed and the file is silence.
    pub placeholder: bool,
    pub bytes: u64,
}

/// Synthesizes voiceovers by walking an ordered chain of engines.
pub struct VoiceoverGenerator {
    engines: Vec<Box<dyn SpeechEngine>>,
    settings: VoiceConfig,
    output_dir: PathBuf,
}

impl VoiceoverGenerator {
    /// Create a generator writing into `output_dir`.
    pub fn new(
        engines: Vec<Box<dyn SpeechEngine>>,
        settings: VoiceConfig,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            engines,
            settings,
            output_dir,
        }
    }

    /// Placeholder length for a script: roughly 15 characters per second,
    /// never below the configured minimum.
    pub fn placeholder_seconds(&self, text: &str) -> f64 {
        let chars = text.chars().count() as f64;
        let estimate = if self.settings.fallback_chars_per_second > 0.0 {
            chars / self.settings.fallback_chars_per_second
        } else {
            0.0
        };
        estimate.max(self.settings.fallback_min_seconds)
    }

    /// Generate `<output_dir>/<stem>.<ext>` from `text`.
    ///
    /// Engines are tried in order, each voice up to `attempts` times. If none
    /// produces a valid file, a silent WAV of estimated length is written.
    pub fn generate(&self, text: &str, stem: &str) -> Result<Voiceover, VoiceoverError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VoiceoverError::EmptyText);
        }

        std::fs::create_dir_all(&self.output_dir)?;

        for engine in &self.engines {
            let name = engine.name();
            if !engine.is_available() {
                warn!("Skipping engine: {}", SpeechError::Unavailable(name));
                continue;
            }

            let path = self
                .output_dir
                .join(format!("{stem}.{}", engine.extension()));

            let voices: Vec<Option<String>> = match engine.voices() {
                voices if voices.is_empty() => vec![None],
                voices => voices.into_iter().map(Some).collect(),
            };

            for voice in voices {
                let mut request = SpeechRequest::new(text).with_rate(self.settings.rate_percent);
                request.voice = voice.clone();

                for attempt in 1..=self.settings.attempts.max(1) {
                    debug!(
                        "{} attempt {}/{} (voice: {})",
                        name,
                        attempt,
                        self.settings.attempts.max(1),
                        voice.as_deref().unwrap_or("default")
                    );

                    remove_stale(&path);

                    if let Err(e) = engine.synthesize(&request, &path) {
                        warn!("{} failed: {}", name, e);
                        remove_stale(&path);
                        continue;
                    }

                    match self.verify(&path) {
                        Ok(bytes) => {
                            info!(
                                "Voiceover from {}: {} ({:.1} KB)",
                                name,
                                path.display(),
                                bytes as f64 / 1024.0
                            );
                            return Ok(Voiceover {
                                path,
                                engine: name,
                                voice,
                                placeholder: false,
                                bytes,
                            });
                        }
                        Err(e) => {
                            warn!("{} produced an invalid file: {}", name, e);
                            remove_stale(&path);
                        }
                    }
                }
            }
        }

        self.write_placeholder(text, stem)
    }

    /// Check that a synthesized file is usable.
    pub fn verify(&self, path: &Path) -> Result<u64, VerifyError> {
        if !path.exists() {
            return Err(VerifyError::Missing);
        }

        let size = std::fs::metadata(path)?.len();
        if size < self.settings.min_bytes {
            return Err(VerifyError::TooSmall {
                size,
                min: self.settings.min_bytes,
            });
        }

        if audio::is_wav(path) {
            let seconds = audio::wav_duration(path)?;
            if seconds < self.settings.min_seconds {
                return Err(VerifyError::TooShort {
                    seconds,
                    min: self.settings.min_seconds,
                });
            }
        }

        Ok(size)
    }

    fn write_placeholder(&self, text: &str, stem: &str) -> Result<Voiceover, VoiceoverError> {
        let seconds = self.placeholder_seconds(text);
        let path = self.output_dir.join(format!("{stem}.wav"));

        warn!(
            "All engines failed, writing {:.1}s of silence to {}",
            seconds,
            path.display()
        );

        audio::write_silent_wav(&path, seconds, self.settings.fallback_sample_rate)?;
        let bytes = std::fs::metadata(&path)?.len();

        Ok(Voiceover {
            path,
            engine: PLACEHOLDER_ENGINE.to_string(),
            voice: None,
            placeholder: true,
            bytes,
        })
    }
}

fn remove_stale(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        debug!("Could not remove {}: {}", path.display(), e);
    }
}
