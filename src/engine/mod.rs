//! Voiceover generation.
//!
//! This module turns an approved script into an audio file by walking the
//! configured TTS engines in order, verifying each output, and degrading to a
//! silent placeholder when nothing usable comes out.

mod voiceover;

pub use voiceover::{
    PLACEHOLDER_ENGINE, VerifyError, Voiceover, VoiceoverError, VoiceoverGenerator,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio;
    use crate::config::VoiceConfig;
    use crate::speech::{MockSpeechEngine, SpeechEngine, SpeechError};
    use std::path::Path;
    use tempfile::TempDir;

    fn settings() -> VoiceConfig {
        VoiceConfig {
            attempts: 2,
            min_bytes: 1024,
            min_seconds: 0.5,
            ..VoiceConfig::default()
        }
    }

    fn mock_engine(name: &str, extension: &str, voices: Vec<&str>) -> MockSpeechEngine {
        let mut mock = MockSpeechEngine::new();
        let name = name.to_string();
        let extension = extension.to_string();
        let voices: Vec<String> = voices.into_iter().map(String::from).collect();

        mock.expect_name().returning(move || name.clone());
        mock.expect_extension().returning(move || extension.clone());
        mock.expect_voices().returning(move || voices.clone());
        mock.expect_is_available().returning(|| true);
        mock
    }

    fn write_valid_wav(output: &Path) -> Result<(), SpeechError> {
        audio::write_silent_wav(output, 1.0, 22050).unwrap();
        Ok(())
    }

    fn failing(_: &crate::speech::SpeechRequest, _: &Path) -> Result<(), SpeechError> {
        Err(SpeechError::Failed {
            engine: "mock".to_string(),
            status: Some(1),
            stderr: "network unreachable".to_string(),
        })
    }

    fn generator(engines: Vec<Box<dyn SpeechEngine>>, dir: &TempDir) -> VoiceoverGenerator {
        VoiceoverGenerator::new(engines, settings(), dir.path().join("audio"))
    }

    // ===========================================
    // Fallback chain tests
    // ===========================================

    #[test]
    fn test_first_engine_success() {
        let temp_dir = TempDir::new().unwrap();
        let mut edge = mock_engine("Edge TTS", "mp3", vec!["fr-FR-DeniseNeural"]);
        edge.expect_synthesize()
            .withf(|req, _| {
                req.voice.as_deref() == Some("fr-FR-DeniseNeural") && req.rate_percent == 10
            })
            .times(1)
            .returning(|_, output| {
                std::fs::write(output, vec![0xFFu8; 4096]).unwrap();
                Ok(())
            });

        let generator = generator(vec![Box::new(edge)], &temp_dir);
        let voiceover = generator.generate("Bonjour à tous", "voiceover_1").unwrap();

        assert_eq!(voiceover.engine, "Edge TTS");
        assert_eq!(voiceover.voice.as_deref(), Some("fr-FR-DeniseNeural"));
        assert!(!voiceover.placeholder);
        assert_eq!(voiceover.bytes, 4096);
        assert_eq!(
            voiceover.path,
            temp_dir.path().join("audio").join("voiceover_1.mp3")
        );
    }

    #[test]
    fn test_unavailable_engine_is_skipped() {
        let temp_dir = TempDir::new().unwrap();

        let mut edge = MockSpeechEngine::new();
        edge.expect_name().returning(|| "Edge TTS".to_string());
        edge.expect_is_available().returning(|| false);
        edge.expect_synthesize().times(0);

        let mut espeak = mock_engine("eSpeak NG", "wav", vec!["fr"]);
        espeak
            .expect_synthesize()
            .times(1)
            .returning(|_, output| write_valid_wav(output));

        let generator = generator(vec![Box::new(edge), Box::new(espeak)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert_eq!(voiceover.engine, "eSpeak NG");
        assert!(voiceover.path.ends_with("voice.wav"));
    }

    #[test]
    fn test_every_voice_retried_before_next_engine() {
        let temp_dir = TempDir::new().unwrap();

        let mut edge = mock_engine("Edge TTS", "mp3", vec!["voice-a", "voice-b"]);
        edge.expect_synthesize().times(4).returning(failing);

        let mut espeak = mock_engine("eSpeak NG", "wav", vec![]);
        espeak
            .expect_synthesize()
            .withf(|req, _| req.voice.is_none())
            .times(1)
            .returning(|_, output| write_valid_wav(output));

        let generator = generator(vec![Box::new(edge), Box::new(espeak)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert_eq!(voiceover.engine, "eSpeak NG");
        assert_eq!(voiceover.voice, None);
    }

    #[test]
    fn test_retry_succeeds_on_second_attempt() {
        let temp_dir = TempDir::new().unwrap();

        let mut calls = 0;
        let mut edge = mock_engine("Edge TTS", "wav", vec!["voice-a"]);
        edge.expect_synthesize().times(2).returning(move |req, output| {
            calls += 1;
            if calls == 1 {
                failing(req, output)
            } else {
                write_valid_wav(output)
            }
        });

        let generator = generator(vec![Box::new(edge)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert!(!voiceover.placeholder);
        assert_eq!(voiceover.engine, "Edge TTS");
    }

    #[test]
    fn test_too_small_output_rejected_and_removed() {
        let temp_dir = TempDir::new().unwrap();

        let mut edge = mock_engine("Edge TTS", "mp3", vec!["voice-a"]);
        edge.expect_synthesize().times(2).returning(|_, output| {
            std::fs::write(output, b"tiny").unwrap();
            Ok(())
        });

        let generator = generator(vec![Box::new(edge)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert!(voiceover.placeholder);
        assert!(!temp_dir.path().join("audio").join("voice.mp3").exists());
    }

    #[test]
    fn test_partial_output_removed_after_engine_error() {
        let temp_dir = TempDir::new().unwrap();

        let mut edge = mock_engine("Edge TTS", "mp3", vec!["voice-a"]);
        edge.expect_synthesize().times(2).returning(|req, output| {
            std::fs::write(output, vec![0xFFu8; 4096]).unwrap();
            failing(req, output)
        });
        let mut espeak = mock_engine("eSpeak NG", "wav", vec!["fr"]);
        espeak
            .expect_synthesize()
            .times(1)
            .returning(|_, output| write_valid_wav(output));

        let generator = generator(vec![Box::new(edge), Box::new(espeak)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert_eq!(voiceover.engine, "eSpeak NG");
        assert!(voiceover.path.ends_with("voice.wav"));
        assert!(!temp_dir.path().join("audio").join("voice.mp3").exists());
    }

    #[test]
    fn test_missing_output_counts_as_failure() {
        let temp_dir = TempDir::new().unwrap();

        let mut pico = mock_engine("SVOX Pico", "wav", vec!["fr-FR"]);
        pico.expect_synthesize().times(2).returning(|_, _| Ok(()));

        let generator = generator(vec![Box::new(pico)], &temp_dir);
        let voiceover = generator.generate("Bonjour", "voice").unwrap();

        assert!(voiceover.placeholder);
    }

    // ===========================================
    // Placeholder tests
    // ===========================================

    #[test]
    fn test_placeholder_when_all_engines_fail() {
        let temp_dir = TempDir::new().unwrap();

        let mut edge = mock_engine("Edge TTS", "mp3", vec!["voice-a"]);
        edge.expect_synthesize().times(2).returning(failing);

        let text = "a".repeat(300);
        let generator = generator(vec![Box::new(edge)], &temp_dir);
        let voiceover = generator.generate(&text, "voice").unwrap();

        assert!(voiceover.placeholder);
        assert_eq!(voiceover.engine, PLACEHOLDER_ENGINE);
        assert!(voiceover.path.ends_with("voice.wav"));

        let duration = audio::wav_duration(&voiceover.path).unwrap();
        assert!((duration - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_placeholder_with_no_engines() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(vec![], &temp_dir);

        let voiceover = generator.generate("Court", "voice").unwrap();

        assert!(voiceover.placeholder);
        let duration = audio::wav_duration(&voiceover.path).unwrap();
        assert!((duration - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_placeholder_seconds_counts_chars_not_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(vec![], &temp_dir);

        assert_eq!(generator.placeholder_seconds("é".repeat(300).as_str()), 20.0);
        assert_eq!(generator.placeholder_seconds("short"), 10.0);
    }

    // ===========================================
    // Verification tests
    // ===========================================

    #[test]
    fn test_verify_short_wav() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short.wav");
        audio::write_silent_wav(&path, 0.1, 22050).unwrap();

        let generator = generator(vec![], &temp_dir);
        let result = generator.verify(&path);

        assert!(matches!(result.unwrap_err(), VerifyError::TooShort { .. }));
    }

    #[test]
    fn test_verify_corrupt_wav() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.wav");
        std::fs::write(&path, vec![7u8; 4096]).unwrap();

        let generator = generator(vec![], &temp_dir);
        let result = generator.verify(&path);

        assert!(matches!(result.unwrap_err(), VerifyError::Unreadable(_)));
    }

    #[test]
    fn test_empty_text_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let generator = generator(vec![], &temp_dir);

        let result = generator.generate("   \n", "voice");
        assert!(matches!(result.unwrap_err(), VoiceoverError::EmptyText));
    }
}
