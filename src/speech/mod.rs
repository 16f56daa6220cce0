//! Text-to-speech engines.
//!
//! Each engine wraps an external synthesizer behind the [`SpeechEngine`]
//! trait so the voiceover generator can chain them and tests can mock them.

mod engines;
mod types;

pub use engines::{EdgeTts, Espeak, Pico, build_engines};
pub use types::{SpeechError, SpeechRequest};

use std::path::Path;

/// Trait for a speech synthesizer that writes audio to a file.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechEngine {
    /// Human-readable engine name for logs.
    fn name(&self) -> String;

    /// Extension of the audio files this engine writes.
    fn extension(&self) -> String;

    /// Voices to try, in order. Empty means the engine default only.
    fn voices(&self) -> Vec<String>;

    /// Whether the engine can run on this machine.
    fn is_available(&self) -> bool;

    /// Synthesize `request` into `output`.
    fn synthesize(&self, request: &SpeechRequest, output: &Path) -> Result<(), SpeechError>;
}
