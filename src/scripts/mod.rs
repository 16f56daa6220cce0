//! Candidate scripts sent out for approval.

mod generator;

pub use generator::{
    CandidateScript, ScriptsError, generate_candidates, load_scripts, load_scripts_or_sample,
    save_scripts,
};
