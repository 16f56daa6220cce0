//! Pipeline configuration.
//!
//! Every setting has a default, so a partial or missing TOML file is valid.
//! Secrets such as the email API key come from the environment only.

mod settings;

pub use settings::{
    Config, ConfigError, EmailConfig, LOCAL_CONFIG_FILE, PathsConfig, VideoConfig, VoiceConfig,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EngineKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.paths.music_dir, PathBuf::from("assets_library/music"));
        assert_eq!(config.voice.engines[0], EngineKind::Edge);
        assert_eq!(config.voice.edge_voices[0], "fr-FR-DeniseNeural");
        assert_eq!(config.voice.fallback_sample_rate, 22050);
        assert_eq!((config.video.width, config.video.height), (1080, 1920));
        assert_eq!(config.video.fps, 24);
        assert_eq!(config.email.api_key_env, "SENDGRID_API_KEY");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shorts.toml");
        std::fs::write(
            &path,
            r#"
[voice]
engines = ["espeak"]
rate_percent = 0

[video]
music_volume = 0.5
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.voice.engines, vec![EngineKind::Espeak]);
        assert_eq!(config.voice.rate_percent, 0);
        assert_eq!(config.voice.attempts, 2);
        assert_eq!(config.video.music_volume, 0.5);
        assert_eq!(config.video.fps, 24);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_path_missing() {
        let result = Config::load(Some(PathBuf::from("/nonexistent/shorts.toml").as_path()));

        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_engine_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "[voice]\nengines = [\"festival\"]\n").unwrap();

        let result = Config::from_path(&path);
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = Config::default();
        config.video.font_file = Some(PathBuf::from("/usr/share/fonts/DejaVuSans-Bold.ttf"));

        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_api_key_from_env() {
        let email = EmailConfig {
            api_key_env: "SHORTS_ASSEMBLY_TEST_KEY_UNSET".to_string(),
            ..EmailConfig::default()
        };
        assert_eq!(email.api_key(), None);
    }
}
