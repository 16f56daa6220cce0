//! Asset library: background music and the human-approved script.

mod assets;

pub use assets::{
    ApprovedScript, LibraryError, MusicLibrary, SCRIPT_TEMPLATE, load_approved_script,
    pick_music, write_template,
};
