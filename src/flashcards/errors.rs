//! Flashcard error types

use thiserror::Error;

use super::models::CardId;

/// Errors raised by the review engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlashcardError {
    /// A value violated a construction-time contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A card reference no longer resolves against the collection
    #[error("Card not found: {0}")]
    NotFound(CardId),

    /// A positional index outside the current filtered view
    #[error("Index {index} is out of range for a list of {len} flashcards")]
    OutOfRange { index: usize, len: usize },

    /// An operation that needs a non-empty input received none
    #[error("No {0} provided")]
    EmptyInput(&'static str),

    /// A card with the same original and translated words already exists
    #[error("Flashcard already exists: {0}")]
    DuplicateCard(String),
}

impl FlashcardError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<FlashcardError> for String {
    fn from(err: FlashcardError) -> Self {
        err.to_string()
    }
}

/// Result type alias for flashcard operations
pub type Result<T> = std::result::Result<T, FlashcardError>;
