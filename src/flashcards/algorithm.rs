//! Tiered spaced repetition policy
//!
//! Every proficiency tier maps to a fixed review interval. Intervals widen
//! with the tier, so a card that keeps being recalled comes back less and
//! less often. The last tier is terminal: a card that reaches it counts as
//! mastered and leaves the due-for-review queue.
//!
//! Default table (days):
//! - tier 0: 1
//! - tier 1: 2
//! - tier 2: 4
//! - tier 3: 8
//! - tier 4: 16
//! - tier 5: 32 (mastered)

use chrono::{DateTime, Duration, Utc};

use super::errors::{FlashcardError, Result};
use super::proficiency::ProficiencyLevel;

/// Interval table used when no configuration overrides it
pub const DEFAULT_INTERVAL_DAYS: [u32; 6] = [1, 2, 4, 8, 16, 32];

/// Upper bound on the number of tiers a policy may declare
pub const MAX_TIER_COUNT: usize = 256;

/// Longest interval a single tier may declare (about a hundred years)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Maps each proficiency tier to the wait before the next review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPolicy {
    interval_days: Vec<u32>,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            interval_days: DEFAULT_INTERVAL_DAYS.to_vec(),
        }
    }
}

impl ReviewPolicy {
    /// Build a policy from one interval (in days) per tier.
    ///
    /// The table must be non-empty, start at one day or more, be strictly
    /// increasing, and stay within `MAX_INTERVAL_DAYS`.
    pub fn from_days(interval_days: &[u32]) -> Result<Self> {
        if interval_days.is_empty() {
            return Err(FlashcardError::invalid("interval table must not be empty"));
        }
        if interval_days.len() > MAX_TIER_COUNT {
            return Err(FlashcardError::invalid(format!(
                "interval table declares {} tiers, at most {} are allowed",
                interval_days.len(),
                MAX_TIER_COUNT
            )));
        }
        if interval_days[0] == 0 {
            return Err(FlashcardError::invalid(
                "tier 0 interval must be at least one day",
            ));
        }
        if let Some(days) = interval_days.iter().find(|&&d| d > MAX_INTERVAL_DAYS) {
            return Err(FlashcardError::invalid(format!(
                "interval of {} days exceeds the limit of {} days",
                days, MAX_INTERVAL_DAYS
            )));
        }
        if let Some(pair) = interval_days.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(FlashcardError::invalid(format!(
                "intervals must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            interval_days: interval_days.to_vec(),
        })
    }

    pub fn interval_days(&self) -> &[u32] {
        &self.interval_days
    }

    /// Index of the terminal (mastered) tier
    pub fn max_tier(&self) -> u8 {
        (self.interval_days.len() - 1) as u8
    }

    /// Review interval for a tier. Tiers past the table reuse the last entry.
    pub fn interval(&self, tier: u8) -> Duration {
        let idx = (tier as usize).min(self.interval_days.len() - 1);
        Duration::days(self.interval_days[idx] as i64)
    }

    /// A fresh level at tier 0, bounded by this policy
    pub fn initial_level(&self) -> ProficiencyLevel {
        ProficiencyLevel::bounded(0, self.max_tier())
    }

    /// A level at a given tier, e.g. when rebuilding a card from stored data
    pub fn level(&self, tier: u8) -> Result<ProficiencyLevel> {
        ProficiencyLevel::new(tier, self.max_tier())
    }

    /// When a card at `level` should next be reviewed, counting from `now`.
    ///
    /// Saturates at the latest representable instant.
    pub fn next_review(&self, level: &ProficiencyLevel, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(level.interval_for_current_tier(self))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// The intervals a success and a failure would produce from `level`
    pub fn preview(&self, level: &ProficiencyLevel) -> IntervalPreview {
        let mut upgraded = *level;
        upgraded.upgrade();
        let mut downgraded = *level;
        downgraded.downgrade();

        IntervalPreview {
            on_success: upgraded.interval_for_current_tier(self),
            on_failure: downgraded.interval_for_current_tier(self),
        }
    }
}

/// Outcome intervals shown before a card is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalPreview {
    pub on_success: Duration,
    pub on_failure: Duration,
}

/// Format an interval to a short human-readable string
pub fn format_interval(interval: Duration) -> String {
    let days = interval.num_days();
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
