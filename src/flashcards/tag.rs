//! Closed-vocabulary tags attached to flashcards

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::FlashcardError;

pub const TAG_CONSTRAINTS: &str = "Tag names should be one of Essentials, Uncommon, Rare, Slang";

/// How common a word is in everyday use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tag {
    Essentials,
    Uncommon,
    Rare,
    Slang,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Essentials, Tag::Uncommon, Tag::Rare, Tag::Slang];

    /// Canonical capitalization of the tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essentials => "Essentials",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Slang => "Slang",
        }
    }

    pub fn is_valid_tag_name(name: &str) -> bool {
        name.parse::<Tag>().is_ok()
    }
}

impl FromStr for Tag {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(FlashcardError::EmptyInput("tag"));
        }
        match s.to_lowercase().as_str() {
            "essentials" => Ok(Self::Essentials),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "slang" => Ok(Self::Slang),
            _ => Err(FlashcardError::invalid(format!(
                "'{}': {}",
                s, TAG_CONSTRAINTS
            ))),
        }
    }
}

impl TryFrom<String> for Tag {
    type Error = FlashcardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a comma-separated list of tag names
pub fn parse_tags(input: &str) -> Result<Vec<Tag>, FlashcardError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
