//! Speech request and error types.

use thiserror::Error;

/// Errors that can occur while running a TTS engine.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("{0} is not installed")]
    Unavailable(String),

    #[error("Failed to start {0}: {1}")]
    Spawn(String, String),

    #[error("{engine} exited with status {status:?}: {stderr}")]
    Failed {
        engine: String,
        status: Option<i32>,
        stderr: String,
    },
}

/// A single synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    /// Engine-specific voice; `None` uses the engine default.
    pub voice: Option<String>,
    /// Speaking rate offset in percent.
    pub rate_percent: i32,
}

impl SpeechRequest {
    /// Create a new request at normal speed with the default voice.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            rate_percent: 0,
        }
    }

    /// Set the voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the rate offset.
    pub fn with_rate(mut self, rate_percent: i32) -> Self {
        self.rate_percent = rate_percent;
        self
    }
}
