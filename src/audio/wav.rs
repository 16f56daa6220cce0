//! WAV helpers built on hound.

use std::path::Path;

use thiserror::Error;

/// Errors from WAV reading and writing.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Invalid duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

/// Write a mono 16-bit WAV of silence.
///
/// Returns the number of frames written.
pub fn write_silent_wav(path: &Path, seconds: f64, sample_rate: u32) -> Result<u32, AudioError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(AudioError::InvalidDuration(seconds));
    }
    if sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate(sample_rate));
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let frames = (f64::from(sample_rate) * seconds).floor() as u32;
    let mut writer = hound::WavWriter::create(path, spec)?;
    {
        let mut samples = writer.get_i16_writer(frames);
        for _ in 0..frames {
            samples.write_sample(0i16);
        }
        samples.flush()?;
    }
    writer.finalize()?;

    Ok(frames)
}

/// Duration of a WAV file in seconds, read from its header.
pub fn wav_duration(path: &Path) -> Result<f64, AudioError> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate(0));
    }
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}

/// Whether the path has a `.wav` extension.
pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}
