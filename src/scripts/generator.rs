//! Candidate script generation and persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Subjects per theme category.
const THEMES: &[(&str, &[&str])] = &[
    (
        "histoire",
        &["Pyramides", "Napoléon", "Rome Antique", "Moyen-Âge", "Révolution"],
    ),
    ("science", &["Espace", "Quantique", "IA", "Climat", "Énergie"]),
    (
        "mystere",
        &["OVNIs", "Civilisations", "Trésors", "Conspiration", "Paranormal"],
    ),
];

const HOOKS: &[&str] = &[
    "Découverte récente",
    "Révélation choquante",
    "Preuve incontestable",
];
const TWISTS: &[&str] = &[
    "Ce que les experts cachent",
    "La vérité dérangeante",
    "Les preuves ignorées",
];
const ENDINGS: &[&str] = &[
    "Pourquoi on vous ment",
    "La conclusion surprenante",
    "Ce qui change tout",
];

/// Errors from script persistence.
#[derive(Error, Debug)]
pub enum ScriptsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A script proposed for approval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateScript {
    pub title: String,
    pub content: String,
}

impl CandidateScript {
    /// Script used when no candidates file exists.
    pub fn sample() -> Self {
        Self {
            title: "SCRIPT DE TEST".to_string(),
            content: "• Ceci est un script de test\n\
                      • Généré car le fichier était manquant\n\
                      • Vérifie la génération automatique"
                .to_string(),
        }
    }
}

fn choose<'a>(rng: &mut fastrand::Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

/// Generate `count` candidate scripts.
pub fn generate_candidates(rng: &mut fastrand::Rng, count: usize) -> Vec<CandidateScript> {
    (0..count)
        .map(|_| {
            let (_, subjects) = THEMES[rng.usize(..THEMES.len())];
            let subject = choose(rng, subjects);
            let secrets = rng.u32(3..=5);

            let title = format!("{secrets} SECRETS SUR {}", subject.to_uppercase());
            let content = [
                format!("• {} sur {subject}", choose(rng, HOOKS)),
                format!("• {}", choose(rng, TWISTS)),
                format!("• {}", choose(rng, ENDINGS)),
            ]
            .join("\n");

            CandidateScript { title, content }
        })
        .collect()
}

/// Save scripts as pretty-printed JSON.
pub fn save_scripts(path: &Path, scripts: &[CandidateScript]) -> Result<(), ScriptsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(scripts)?;
    std::fs::write(path, json)?;
    info!("Saved {} scripts to {}", scripts.len(), path.display());
    Ok(())
}

/// Load scripts from JSON.
pub fn load_scripts(path: &Path) -> Result<Vec<CandidateScript>, ScriptsError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Load scripts, or the single sample script when the file is missing.
pub fn load_scripts_or_sample(path: &Path) -> Result<Vec<CandidateScript>, ScriptsError> {
    if !path.exists() {
        warn!(
            "{} not found, using the sample script",
            path.display()
        );
        return Ok(vec![CandidateScript::sample()]);
    }

    let scripts = load_scripts(path)?;
    info!("Loaded {} scripts from {}", scripts.len(), path.display());
    Ok(scripts)
}
