//! Word values that make up a flashcard's word pair

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{FlashcardError, Result};

/// A piece of text tagged with the language it is written in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWord")]
pub struct Word {
    text: String,
    language: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWord {
    text: String,
    language: String,
}

impl TryFrom<RawWord> for Word {
    type Error = FlashcardError;

    fn try_from(raw: RawWord) -> Result<Self> {
        Word::new(raw.text, raw.language)
    }
}

impl Word {
    /// Create a word, trimming surrounding whitespace.
    ///
    /// Fails when either the text or the language is blank.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let text = text.into().trim().to_string();
        let language = language.into().trim().to_string();
        if text.is_empty() {
            return Err(FlashcardError::invalid("word must not be empty"));
        }
        if language.is_empty() {
            return Err(FlashcardError::invalid("language must not be empty"));
        }
        Ok(Self { text, language })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Substring containment against the word text
    pub fn has_subpart(&self, part: &str) -> bool {
        self.text.contains(part)
    }

    pub fn is_same_language(&self, language: &str) -> bool {
        self.language == language
    }

    /// Case-insensitive comparison of the text only
    pub fn matches_ignore_case(&self, other: &Word) -> bool {
        self.text.to_lowercase() == other.text.to_lowercase()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The word in the language the user already knows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginalWord(Word);

/// The word in the language being learned
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslatedWord(Word);

impl OriginalWord {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        Word::new(text, language).map(Self)
    }

    pub fn word(&self) -> &Word {
        &self.0
    }
}

impl TranslatedWord {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        Word::new(text, language).map(Self)
    }

    pub fn word(&self) -> &Word {
        &self.0
    }
}

impl std::ops::Deref for OriginalWord {
    type Target = Word;

    fn deref(&self) -> &Word {
        &self.0
    }
}

impl std::ops::Deref for TranslatedWord {
    type Target = Word;

    fn deref(&self) -> &Word {
        &self.0
    }
}

impl fmt::Display for OriginalWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for TranslatedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
