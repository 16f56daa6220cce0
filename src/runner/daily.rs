//! The daily pipeline: script, music, voiceover, video.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PathsConfig;
use crate::engine::{Voiceover, VoiceoverError, VoiceoverGenerator};
use crate::library::{self, ApprovedScript, LibraryError, MusicLibrary};
use crate::video::{MediaToolkit, VideoBuilder, VideoError};

/// Errors that stop a daily run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("No approved script at {0}")]
    ScriptMissing(PathBuf),

    #[error("No music available in {0}")]
    NoMusic(PathBuf),

    #[error("Asset error: {0}")]
    Library(#[from] LibraryError),

    #[error("Voiceover error: {0}")]
    Voiceover(#[from] VoiceoverError),

    #[error("Video error: {0}")]
    Video(#[from] VideoError),
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub script_chars: usize,
    pub music: PathBuf,
    pub voiceover: Voiceover,
    pub video: Option<PathBuf>,
}

/// Runs one day's content generation.
pub struct DailyRunner<T: MediaToolkit> {
    paths: PathsConfig,
    music: MusicLibrary,
    voiceover: VoiceoverGenerator,
    video: Option<VideoBuilder<T>>,
}

impl<T: MediaToolkit> DailyRunner<T> {
    /// Create a runner. Passing no video builder stops after the voiceover.
    pub fn new(
        paths: PathsConfig,
        music: MusicLibrary,
        voiceover: VoiceoverGenerator,
        video: Option<VideoBuilder<T>>,
    ) -> Self {
        Self {
            paths,
            music,
            voiceover,
            video,
        }
    }

    /// Timestamp used in output names.
    pub fn stamp(now: NaiveDateTime) -> String {
        now.format("%Y%m%d_%H%M").to_string()
    }

    /// Run the pipeline for `now`.
    ///
    /// A missing approved script gets a template written in its place and
    /// fails the run, so a human can fill it in before the next one.
    pub fn run(&mut self, now: NaiveDateTime) -> Result<RunReport, RunError> {
        let script_path = &self.paths.approved_script;

        if !script_path.exists() {
            warn!("Approved script missing, writing template");
            library::write_template(script_path, false)?;
            return Err(RunError::ScriptMissing(script_path.clone()));
        }

        let script = library::load_approved_script(script_path)?
            .ok_or_else(|| RunError::ScriptMissing(script_path.clone()))?;

        let music = self
            .music
            .pick()
            .ok_or_else(|| RunError::NoMusic(self.paths.music_dir.clone()))?;

        let script_chars = script.chars().count();
        info!("Script: {} characters", script_chars);

        let parsed = ApprovedScript::parse(&script);
        let stamp = Self::stamp(now);

        info!("Generating voiceover");
        let voiceover = self
            .voiceover
            .generate(&parsed.narration(), &format!("voiceover_{stamp}"))?;
        if voiceover.placeholder {
            warn!("Voiceover is a silent placeholder");
        }

        let video = match &self.video {
            Some(builder) => {
                let name = format!("short_{stamp}");
                let path = match &parsed.title {
                    Some(title) => builder.create_video_titled(
                        &voiceover.path,
                        &music,
                        &name,
                        &title.to_uppercase(),
                    )?,
                    None => builder.create_video(&voiceover.path, &music, &name)?,
                };
                Some(path)
            }
            None => {
                info!("Video step skipped");
                None
            }
        };

        Ok(RunReport {
            script_chars,
            music,
            voiceover,
            video,
        })
    }
}
