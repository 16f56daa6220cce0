//! CLI argument definitions and parsing.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// YouTube Shorts assembly pipeline.
#[derive(Parser, Debug)]
#[command(name = "shorts-assembly")]
#[command(about = "Music pick, TTS voiceover, vertical video and approval email for YouTube Shorts")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to ./shorts.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline steps.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate candidate scripts and save them as JSON
    Scripts {
        /// Number of scripts to generate
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (defaults to paths.scripts_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Email the candidate scripts for approval
    Notify {
        /// Scripts file (defaults to paths.scripts_file)
        #[arg(short, long)]
        scripts: Option<PathBuf>,
    },

    /// Synthesize a voiceover only
    Voice {
        /// Text to speak
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file stem inside paths.audio_dir
        #[arg(short, long, default_value = "voiceover_test")]
        name: String,

        /// Engine order override (repeatable)
        #[arg(short, long, value_enum)]
        engine: Vec<EngineKind>,
    },

    /// Build a video from an existing voiceover and music track
    Video {
        /// Voiceover audio file
        #[arg(short, long)]
        audio: PathBuf,

        /// Background music file
        #[arg(short, long)]
        music: PathBuf,

        /// Output name inside paths.video_dir (without extension)
        #[arg(short, long, default_value = "short_test")]
        name: String,
    },

    /// Run the daily pipeline: music, voiceover, video
    Run {
        /// Stop after the voiceover
        #[arg(long)]
        skip_video: bool,
    },

    /// Write the approved-script template
    Template {
        /// Overwrite an existing script
        #[arg(long)]
        force: bool,
    },

    /// Print environment diagnostics
    Doctor,
}

/// TTS engine selection.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Microsoft Edge neural voices through the edge-tts CLI
    #[default]
    #[value(name = "edge")]
    Edge,

    /// eSpeak NG formant synthesizer
    #[value(name = "espeak")]
    Espeak,

    /// SVOX Pico through pico2wave
    #[value(name = "pico")]
    Pico,
}

impl EngineKind {
    /// Returns the CLI argument string for this engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Edge => "edge",
            EngineKind::Espeak => "espeak",
            EngineKind::Pico => "pico",
        }
    }

    /// Returns the primary executable for this engine.
    pub fn program(&self) -> &'static str {
        match self {
            EngineKind::Edge => "edge-tts",
            EngineKind::Espeak => "espeak-ng",
            EngineKind::Pico => "pico2wave",
        }
    }

    /// Returns the human-readable name of the engine.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Edge => "Edge TTS",
            EngineKind::Espeak => "eSpeak NG",
            EngineKind::Pico => "SVOX Pico",
        }
    }
}
