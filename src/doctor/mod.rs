//! Environment diagnostics for the pipeline.

mod checks;

pub use checks::{Check, locate_on_path, run_checks};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PathsConfig};
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> Config {
        let root = temp_dir.path();
        Config {
            paths: PathsConfig {
                music_dir: root.join("music"),
                approved_script: root.join("script_approved.txt"),
                audio_dir: root.join("audio"),
                video_dir: root.join("videos"),
                scripts_file: root.join("scripts.json"),
            },
            ..Config::default()
        }
    }

    fn find<'a>(checks: &'a [Check], label: &str) -> &'a Check {
        checks.iter().find(|c| c.label == label).unwrap()
    }

    #[test]
    fn test_missing_everything() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(&temp_dir);
        config.email.api_key_env = "SHORTS_ASSEMBLY_DOCTOR_UNSET".to_string();

        let checks = run_checks(&config, |_| None);

        assert!(checks.iter().all(|c| !c.ok));
        assert_eq!(find(&checks, "ffmpeg").detail, "not found in PATH");
        assert!(find(&checks, "approved script").detail.ends_with("(missing)"));
        assert_eq!(
            find(&checks, "email api key").detail,
            "SHORTS_ASSEMBLY_DOCTOR_UNSET is not set"
        );
    }

    #[test]
    fn test_espeak_alternative_binary() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);

        let checks = run_checks(&config, |p| (p == "espeak").then(|| "/usr/bin/espeak".to_string()));

        let espeak = find(&checks, "espeak");
        assert!(espeak.ok);
        assert_eq!(espeak.detail, "/usr/bin/espeak");
        assert!(!find(&checks, "edge-tts").ok);
    }

    #[test]
    fn test_present_assets() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        std::fs::create_dir_all(&config.paths.music_dir).unwrap();
        std::fs::write(config.paths.music_dir.join("a.mp3"), b"x").unwrap();
        std::fs::write(config.paths.music_dir.join("b.wav"), b"x").unwrap();
        std::fs::write(&config.paths.approved_script, "TITRE: x").unwrap();
        std::fs::create_dir_all(&config.paths.audio_dir).unwrap();

        let checks = run_checks(&config, |p| Some(format!("/usr/bin/{p}")));

        let music = find(&checks, "music");
        assert!(music.ok);
        assert!(music.detail.ends_with("(2 tracks)"));
        assert!(find(&checks, "approved script").ok);
        assert!(find(&checks, "audio output").ok);
        assert!(!find(&checks, "video output").ok);
        assert_eq!(find(&checks, "ffprobe").detail, "/usr/bin/ffprobe");
    }
}
