//! Audio file helpers.

mod wav;

pub use wav::{AudioError, is_wav, wav_duration, write_silent_wav};
