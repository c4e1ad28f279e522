pub mod config;
pub mod flashcards;

pub use config::{ConfigError, FlashlingoConfig};
pub use flashcards::{
    CardFilter, CardId, CardQuery, FlashCard, FlashcardDeck, FlashcardError, ProficiencyLevel,
    ReviewPolicy, ReviewSession, Tag,
};
