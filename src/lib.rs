//! shorts-assembly: YouTube Shorts assembly pipeline.
//!
//! This crate picks background music, synthesizes a voiceover from the
//! approved script through a chain of TTS engines, composites a vertical
//! video with title and countdown overlays, and emails candidate scripts for
//! approval.

pub mod audio;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod engine;
pub mod library;
pub mod notify;
pub mod runner;
pub mod scripts;
pub mod speech;
pub mod video;
