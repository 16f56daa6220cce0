//! ffmpeg / ffprobe process wrapper.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tracing::debug;

use super::MediaToolkit;
use super::builder::VideoError;
use crate::audio;

/// Shells out to ffmpeg and ffprobe found on PATH.
pub struct FfmpegToolkit {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl FfmpegToolkit {
    /// Locate both executables.
    pub fn new() -> Result<Self, VideoError> {
        Ok(Self {
            ffmpeg_path: Self::find_executable("ffmpeg")?,
            ffprobe_path: Self::find_executable("ffprobe")?,
        })
    }

    /// Use explicit executable paths.
    pub fn with_paths(ffmpeg_path: PathBuf, ffprobe_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }

    fn find_executable(name: &str) -> Result<PathBuf, VideoError> {
        which::which(name).map_err(|_| VideoError::ToolNotFound(name.to_string()))
    }

    /// Extract `format.duration` from `ffprobe -print_format json` output.
    pub fn parse_probe_duration(json: &[u8]) -> Result<f64, VideoError> {
        let value: Value =
            serde_json::from_slice(json).map_err(|e| VideoError::Probe(e.to_string()))?;

        value["format"]["duration"]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| VideoError::Probe("No duration in ffprobe output".to_string()))
    }
}

impl MediaToolkit for FfmpegToolkit {
    fn probe_duration(&self, path: &Path) -> Result<f64, VideoError> {
        if !path.exists() {
            return Err(VideoError::FileNotFound(path.to_path_buf()));
        }

        if audio::is_wav(path)
            && let Ok(seconds) = audio::wav_duration(path)
        {
            return Ok(seconds);
        }

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()
            .map_err(|e| VideoError::Process(e.to_string()))?;

        if !output.status.success() {
            return Err(VideoError::Probe(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Self::parse_probe_duration(&output.stdout)
    }

    fn render(&self, args: &[String]) -> Result<(), VideoError> {
        debug!("ffmpeg {}", args.join(" "));

        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| VideoError::Process(e.to_string()))?;

        if !output.status.success() {
            return Err(VideoError::Render(format!(
                "ffmpeg failed with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
