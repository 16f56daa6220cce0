//! Command-line TTS engines.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::SpeechEngine;
use super::types::{SpeechError, SpeechRequest};
use crate::cli::EngineKind;
use crate::config::VoiceConfig;

/// eSpeak NG default speaking rate in words per minute.
const ESPEAK_BASE_WPM: f64 = 175.0;

/// Run a prepared command and map a non-zero exit to [`SpeechError::Failed`].
fn run_command(engine: &str, mut command: Command) -> Result<(), SpeechError> {
    debug!("Running {:?}", command);

    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| SpeechError::Spawn(engine.to_string(), e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(SpeechError::Failed {
            engine: engine.to_string(),
            status: output.status.code(),
            stderr,
        });
    }

    Ok(())
}

/// Microsoft Edge neural voices through the `edge-tts` CLI.
pub struct EdgeTts {
    voices: Vec<String>,
}

impl EdgeTts {
    pub fn new(voices: Vec<String>) -> Self {
        Self { voices }
    }

    /// Format a rate offset the way edge-tts expects it (`+10%`, `-5%`).
    pub fn rate_arg(rate_percent: i32) -> String {
        format!("{rate_percent:+}%")
    }

    /// Build the edge-tts invocation.
    pub fn command(&self, request: &SpeechRequest, output: &Path) -> Command {
        let mut command = Command::new(EngineKind::Edge.program());
        if let Some(voice) = &request.voice {
            command.arg("--voice").arg(voice);
        }
        // Values are joined with `=` or a leading '-' reads as a flag.
        let mut text_arg = OsString::from("--text=");
        text_arg.push(&request.text);
        command
            .arg(format!("--rate={}", Self::rate_arg(request.rate_percent)))
            .arg(text_arg)
            .arg("--write-media")
            .arg(output);
        command
    }
}

impl SpeechEngine for EdgeTts {
    fn name(&self) -> String {
        EngineKind::Edge.name().to_string()
    }

    fn extension(&self) -> String {
        "mp3".to_string()
    }

    fn voices(&self) -> Vec<String> {
        self.voices.clone()
    }

    fn is_available(&self) -> bool {
        which::which(EngineKind::Edge.program()).is_ok()
    }

    fn synthesize(&self, request: &SpeechRequest, output: &Path) -> Result<(), SpeechError> {
        run_command(&self.name(), self.command(request, output))
    }
}

/// eSpeak NG, falling back to the classic `espeak` binary.
pub struct Espeak {
    voice: String,
    program: String,
}

impl Espeak {
    pub fn new(voice: impl Into<String>) -> Self {
        let program = if which::which(EngineKind::Espeak.program()).is_ok() {
            EngineKind::Espeak.program()
        } else {
            "espeak"
        };

        Self {
            voice: voice.into(),
            program: program.to_string(),
        }
    }

    /// Words per minute for a rate offset, never below 80.
    pub fn words_per_minute(rate_percent: i32) -> u32 {
        let wpm = ESPEAK_BASE_WPM * (1.0 + f64::from(rate_percent) / 100.0);
        wpm.round().max(80.0) as u32
    }

    /// Build the espeak invocation.
    pub fn command(&self, request: &SpeechRequest, output: &Path) -> Command {
        let voice = request.voice.as_deref().unwrap_or(&self.voice);
        let mut command = Command::new(&self.program);
        command
            .args(["-v", voice])
            .arg("-s")
            .arg(Self::words_per_minute(request.rate_percent).to_string())
            .arg("-w")
            .arg(output)
            .arg("--")
            .arg(&request.text);
        command
    }
}

impl SpeechEngine for Espeak {
    fn name(&self) -> String {
        EngineKind::Espeak.name().to_string()
    }

    fn extension(&self) -> String {
        "wav".to_string()
    }

    fn voices(&self) -> Vec<String> {
        vec![self.voice.clone()]
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn synthesize(&self, request: &SpeechRequest, output: &Path) -> Result<(), SpeechError> {
        run_command(&self.name(), self.command(request, output))
    }
}

/// SVOX Pico through `pico2wave`. Has no rate control.
pub struct Pico {
    language: String,
}

impl Pico {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Build the pico2wave invocation.
    pub fn command(&self, request: &SpeechRequest, output: &Path) -> Command {
        let language = request.voice.as_deref().unwrap_or(&self.language);
        let mut output_arg = OsString::from("--wave=");
        output_arg.push(output.as_os_str());

        let mut command = Command::new(EngineKind::Pico.program());
        command
            .arg(format!("--lang={language}"))
            .arg(output_arg)
            .arg("--")
            .arg(&request.text);
        command
    }
}

impl SpeechEngine for Pico {
    fn name(&self) -> String {
        EngineKind::Pico.name().to_string()
    }

    fn extension(&self) -> String {
        "wav".to_string()
    }

    fn voices(&self) -> Vec<String> {
        vec![self.language.clone()]
    }

    fn is_available(&self) -> bool {
        which::which(EngineKind::Pico.program()).is_ok()
    }

    fn synthesize(&self, request: &SpeechRequest, output: &Path) -> Result<(), SpeechError> {
        run_command(&self.name(), self.command(request, output))
    }
}

/// Create the engine chain, in order, for the given kinds.
pub fn build_engines(kinds: &[EngineKind], config: &VoiceConfig) -> Vec<Box<dyn SpeechEngine>> {
    kinds
        .iter()
        .map(|kind| -> Box<dyn SpeechEngine> {
            match kind {
                EngineKind::Edge => Box::new(EdgeTts::new(config.edge_voices.clone())),
                EngineKind::Espeak => Box::new(Espeak::new(config.espeak_voice.clone())),
                EngineKind::Pico => Box::new(Pico::new(config.pico_language.clone())),
            }
        })
        .collect()
}
