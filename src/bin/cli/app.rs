use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use flashlingo_lib::flashcards::{FlashCard, FlashcardDeck, ReviewPolicy};
use flashlingo_lib::FlashlingoConfig;

/// Shared state for CLI commands
pub struct App {
    pub policy: ReviewPolicy,
}

impl App {
    /// Load configuration from `config_path` or the platform default
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => FlashlingoConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => FlashlingoConfig::load_or_default(None),
        };
        let policy = config
            .review_policy()
            .context("Invalid review interval table")?;

        Ok(Self { policy })
    }

    /// Import a JSON array of cards into a fresh deck
    pub fn load_deck(&self, path: &Path) -> Result<FlashcardDeck> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let cards: Vec<FlashCard> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid flashcards in {}", path.display()))?;

        log::debug!("Imported {} cards from {}", cards.len(), path.display());
        FlashcardDeck::with_cards(self.policy.clone(), cards)
            .with_context(|| format!("Failed to build deck from {}", path.display()))
    }
}
