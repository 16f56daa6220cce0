//! Background music and approved script access.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Extensions accepted as background music.
const MUSIC_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Labels recognised in an approved script.
const TITLE_LABEL: &str = "TITRE";
const POINT_LABEL: &str = "POINT";
const CTA_LABEL: &str = "CTA";

/// Written when no approved script exists yet.
pub const SCRIPT_TEMPLATE: &str = "TITRE: 3 Révélations Surprenantes Aujourd'hui

POINT 1: Une découverte étonnante qui change tout
POINT 2: La vérité cachée derrière les apparences
POINT 3: Ce que personne ne veut que vous sachiez

CTA: Likez pour la partie 2!
";

/// Errors from the asset library.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Script already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Picks background music from a directory of tracks.
pub struct MusicLibrary {
    dir: PathBuf,
    rng: fastrand::Rng,
}

impl MusicLibrary {
    /// Create a library with a randomly seeded picker.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_rng(dir, fastrand::Rng::new())
    }

    /// Create a library with a caller-provided picker.
    pub fn with_rng(dir: impl Into<PathBuf>, rng: fastrand::Rng) -> Self {
        Self {
            dir: dir.into(),
            rng,
        }
    }

    /// All tracks in the directory, sorted by path.
    pub fn tracks(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(e) => {
                debug!("Cannot read {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut tracks: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_music(path))
            .collect();
        tracks.sort();
        tracks
    }

    /// Pick a track uniformly at random.
    pub fn pick(&mut self) -> Option<PathBuf> {
        let tracks = self.tracks();
        if tracks.is_empty() {
            warn!("No music available in {}", self.dir.display());
            return None;
        }

        let idx = self.rng.usize(..tracks.len());
        let selected = tracks.into_iter().nth(idx)?;
        info!(
            "Selected music: {}",
            selected
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        );
        Some(selected)
    }
}

/// Pick a random track from `dir`.
pub fn pick_music(dir: &Path) -> Option<PathBuf> {
    MusicLibrary::new(dir).pick()
}

fn is_music(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MUSIC_EXTENSIONS.contains(&ext.as_str()))
}

/// Read the approved script, trimmed. `None` when missing or blank.
pub fn load_approved_script(path: &Path) -> Result<Option<String>, LibraryError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

/// Write the script template, creating parent directories.
pub fn write_template(path: &Path, overwrite: bool) -> Result<(), LibraryError> {
    if path.exists() && !overwrite {
        return Err(LibraryError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, SCRIPT_TEMPLATE)?;
    info!("Template script written to {}", path.display());
    Ok(())
}

/// An approved script split into its labelled parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApprovedScript {
    pub title: Option<String>,
    pub points: Vec<String>,
    pub cta: Option<String>,
    /// Lines without a recognised label.
    pub body: Vec<String>,
    /// Every line with its label removed, in order.
    spoken: Vec<String>,
}

impl ApprovedScript {
    /// Parse `TITRE:` / `POINT n:` / `CTA:` lines. Other lines are kept as body.
    pub fn parse(text: &str) -> Self {
        let mut script = Self::default();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let spoken = match split_label(line) {
                Some((label, value)) if label == TITLE_LABEL => {
                    script.title = Some(value.to_string());
                    value
                }
                Some((label, value)) if label.starts_with(POINT_LABEL) => {
                    script.points.push(value.to_string());
                    value
                }
                Some((label, value)) if label == CTA_LABEL => {
                    script.cta = Some(value.to_string());
                    value
                }
                _ => {
                    script.body.push(line.to_string());
                    line
                }
            };
            if !spoken.is_empty() {
                script.spoken.push(spoken.to_string());
            }
        }

        script
    }

    /// Text to read aloud, labels removed, in script order.
    pub fn narration(&self) -> String {
        self.spoken.join("\n")
    }
}

/// Split `LABEL: value` where LABEL is upper-case words and digits.
fn split_label(line: &str) -> Option<(&str, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim();
    let is_label = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ');
    is_label.then(|| (label, value.trim()))
}
