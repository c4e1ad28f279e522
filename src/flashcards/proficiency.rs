//! Proficiency tier state machine

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::algorithm::{ReviewPolicy, DEFAULT_INTERVAL_DAYS};
use super::errors::{FlashcardError, Result};

/// Mastery tier of a card, bounded to `[0, max_tier]`.
///
/// Transitions are crate-private: only `FlashCard::update_level` moves a
/// level, so the due date is always recomputed together with the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLevel")]
pub struct ProficiencyLevel {
    tier: u8,
    max_tier: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel {
    tier: u8,
    #[serde(default = "default_max_tier")]
    max_tier: u8,
}

fn default_max_tier() -> u8 {
    (DEFAULT_INTERVAL_DAYS.len() - 1) as u8
}

impl TryFrom<RawLevel> for ProficiencyLevel {
    type Error = FlashcardError;

    fn try_from(raw: RawLevel) -> Result<Self> {
        ProficiencyLevel::new(raw.tier, raw.max_tier)
    }
}

impl Default for ProficiencyLevel {
    fn default() -> Self {
        Self::bounded(0, default_max_tier())
    }
}

impl ProficiencyLevel {
    pub fn new(tier: u8, max_tier: u8) -> Result<Self> {
        if tier > max_tier {
            return Err(FlashcardError::invalid(format!(
                "proficiency tier {} is outside 0..={}",
                tier, max_tier
            )));
        }
        Ok(Self { tier, max_tier })
    }

    pub(crate) fn bounded(tier: u8, max_tier: u8) -> Self {
        Self {
            tier: tier.min(max_tier),
            max_tier,
        }
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn max_tier(&self) -> u8 {
        self.max_tier
    }

    /// Move up one tier; no-op once mastered
    pub(crate) fn upgrade(&mut self) {
        if self.tier < self.max_tier {
            self.tier += 1;
        }
    }

    /// Move down one tier; no-op at tier 0
    pub(crate) fn downgrade(&mut self) {
        self.tier = self.tier.saturating_sub(1);
    }

    pub fn interval_for_current_tier(&self, policy: &ReviewPolicy) -> Duration {
        policy.interval(self.tier)
    }

    /// True once the card has reached the terminal tier
    pub fn is_deleted_from_review(&self) -> bool {
        self.tier == self.max_tier
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tier)
    }
}
