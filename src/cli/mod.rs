//! CLI argument parsing.

mod args;

pub use args::{Args, Command, EngineKind};
