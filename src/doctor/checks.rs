//! Environment diagnostics.

use std::path::Path;

use crate::config::Config;
use crate::library::MusicLibrary;

/// External programs the pipeline can use. Alternatives share a label.
const TOOLS: &[(&str, &[&str])] = &[
    ("ffmpeg", &["ffmpeg"]),
    ("ffprobe", &["ffprobe"]),
    ("edge-tts", &["edge-tts"]),
    ("espeak", &["espeak-ng", "espeak"]),
    ("pico2wave", &["pico2wave"]),
];

/// One diagnostic line.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub label: String,
    pub ok: bool,
    pub detail: String,
}

impl Check {
    fn new(label: impl Into<String>, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok,
            detail: detail.into(),
        }
    }
}

fn path_check(label: &str, path: &Path) -> Check {
    let ok = path.exists();
    let detail = if ok {
        path.display().to_string()
    } else {
        format!("{} (missing)", path.display())
    };
    Check::new(label, ok, detail)
}

/// Run every check. `locate` resolves a program name to its path.
pub fn run_checks<F>(config: &Config, locate: F) -> Vec<Check>
where
    F: Fn(&str) -> Option<String>,
{
    let mut checks = Vec::new();

    for (label, programs) in TOOLS {
        let found = programs.iter().find_map(|&p| locate(p));
        checks.push(match found {
            Some(path) => Check::new(*label, true, path),
            None => Check::new(*label, false, "not found in PATH"),
        });
    }

    let music_dir = &config.paths.music_dir;
    let tracks = MusicLibrary::new(music_dir).tracks().len();
    checks.push(Check::new(
        "music",
        tracks > 0,
        format!("{} ({} tracks)", music_dir.display(), tracks),
    ));

    checks.push(path_check("approved script", &config.paths.approved_script));
    checks.push(path_check("scripts file", &config.paths.scripts_file));
    checks.push(path_check("audio output", &config.paths.audio_dir));
    checks.push(path_check("video output", &config.paths.video_dir));

    let key_env = &config.email.api_key_env;
    checks.push(match config.email.api_key() {
        Some(_) => Check::new("email api key", true, format!("{key_env} is set")),
        None => Check::new("email api key", false, format!("{key_env} is not set")),
    });

    checks
}

/// Look a program up on PATH.
pub fn locate_on_path(program: &str) -> Option<String> {
    which::which(program)
        .ok()
        .map(|path| path.display().to_string())
}
