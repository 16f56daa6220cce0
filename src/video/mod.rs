//! Video assembly.
//!
//! Plans the title and countdown overlays against the voice duration, builds
//! the ffmpeg filter graph (black vertical canvas, text overlays, voice mixed
//! with attenuated music) and renders it through a [`MediaToolkit`].

mod builder;
mod ffmpeg;
mod timeline;

pub use builder::{VideoBuilder, VideoError};
pub use ffmpeg::FfmpegToolkit;
pub use timeline::{Overlay, build_ffmpeg_args, drawtext_filter, escape_drawtext, plan_overlays};

use std::path::Path;

/// Trait for the external media tools, mockable in tests.
#[cfg_attr(test, mockall::automock)]
pub trait MediaToolkit {
    /// Duration of an audio or video file in seconds.
    fn probe_duration(&self, path: &Path) -> Result<f64, VideoError>;

    /// Run ffmpeg with the given arguments.
    fn render(&self, args: &[String]) -> Result<(), VideoError>;
}
