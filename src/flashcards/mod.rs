//! Flashcard and spaced repetition system for Flashlingo
//!
//! This module provides:
//! - Word/translation cards with a closed tag vocabulary
//! - A tiered proficiency state machine and its interval policy
//! - Due/keyword/language/tag filtering over card collections
//! - An in-memory deck with index-addressed commands and review sessions

pub mod algorithm;
pub mod deck;
mod errors;
pub mod models;
pub mod proficiency;
pub mod query;
pub mod session;
pub mod tag;
pub mod words;

pub use algorithm::{format_interval, IntervalPreview, ReviewPolicy};
pub use deck::{FlashcardDeck, ReviewStats};
pub use errors::{FlashcardError, Result};
pub use models::*;
pub use proficiency::ProficiencyLevel;
pub use query::{filter_cards, CardFilter, CardQuery};
pub use session::{ReviewSession, SessionSummary};
pub use tag::{parse_tags, Tag};
pub use words::{OriginalWord, TranslatedWord, Word};
