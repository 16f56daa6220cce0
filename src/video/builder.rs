//! Vertical video assembly.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::MediaToolkit;
use super::timeline::{build_ffmpeg_args, plan_overlays};
use crate::config::VideoConfig;

/// Errors that can occur while building a video.
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("{0} not found in PATH")]
    ToolNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Could not read media duration: {0}")]
    Probe(String),

    #[error("Invalid voice duration: {0}")]
    InvalidDuration(f64),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Composites voice, music and overlays into an mp4.
pub struct VideoBuilder<T: MediaToolkit> {
    toolkit: T,
    config: VideoConfig,
    output_dir: PathBuf,
}

impl<T: MediaToolkit> VideoBuilder<T> {
    pub fn new(toolkit: T, config: VideoConfig, output_dir: PathBuf) -> Self {
        Self {
            toolkit,
            config,
            output_dir,
        }
    }

    /// Build `<output_dir>/<name>.mp4` using the configured title.
    pub fn create_video(
        &self,
        voice: &Path,
        music: &Path,
        name: &str,
    ) -> Result<PathBuf, VideoError> {
        self.create_video_titled(voice, music, name, &self.config.title)
    }

    /// Build `<output_dir>/<name>.mp4` with an explicit title.
    pub fn create_video_titled(
        &self,
        voice: &Path,
        music: &Path,
        name: &str,
        title: &str,
    ) -> Result<PathBuf, VideoError> {
        for input in [voice, music] {
            if !input.exists() {
                return Err(VideoError::FileNotFound(input.to_path_buf()));
            }
        }

        info!("Loading voice: {}", display_name(voice));
        info!("Loading music: {}", display_name(music));

        let duration = self.toolkit.probe_duration(voice)?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(VideoError::InvalidDuration(duration));
        }
        info!("Voice duration: {:.1}s", duration);

        let overlays = plan_overlays(duration, title, &self.config);

        std::fs::create_dir_all(&self.output_dir)?;
        let output = self.output_dir.join(format!("{name}.mp4"));

        let args = build_ffmpeg_args(voice, music, &output, duration, &overlays, &self.config);
        info!("Rendering {} ({} overlays)", output.display(), overlays.len());
        self.toolkit.render(&args)?;

        if !output.exists() {
            return Err(VideoError::Render(format!(
                "ffmpeg reported success but {} is missing",
                output.display()
            )));
        }

        let size = std::fs::metadata(&output)?.len();
        info!(
            "Video created: {} ({:.1} MB)",
            output.display(),
            size as f64 / (1024.0 * 1024.0)
        );

        Ok(output)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
