//! Review sessions over the cards that are due
//!
//! A session snapshots the ids of the due cards when it starts and walks
//! them in deck order. Answering a card records the recall outcome and
//! reschedules it through the deck; cards deleted in the meantime surface
//! as `NotFound` when the session reaches them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deck::FlashcardDeck;
use super::errors::Result;
use super::models::{CardId, FlashCard};

/// Running tally of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub remembered: usize,
    pub forgotten: usize,
    pub skipped: usize,
    pub remaining: usize,
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    queue: Vec<CardId>,
    position: usize,
    remembered: usize,
    forgotten: usize,
    skipped: usize,
}

impl ReviewSession {
    /// Start a session over the cards due at `now`
    pub fn start(deck: &FlashcardDeck, now: DateTime<Utc>) -> Self {
        let queue: Vec<CardId> = deck.due_cards(now).iter().map(|c| c.id()).collect();
        log::info!("Review session started with {} due cards", queue.len());
        Self {
            queue,
            position: 0,
            remembered: 0,
            forgotten: 0,
            skipped: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// Id of the card under review, if any
    pub fn current_id(&self) -> Option<CardId> {
        self.queue.get(self.position).copied()
    }

    /// The card under review. Fails if it was removed from the deck.
    pub fn current<'a>(&self, deck: &'a FlashcardDeck) -> Option<Result<&'a FlashCard>> {
        self.current_id().map(|id| deck.get(id))
    }

    /// Answer the current card and advance.
    ///
    /// A stale card still advances the session so one deleted card does
    /// not block the rest of the queue.
    pub fn answer(
        &mut self,
        deck: &mut FlashcardDeck,
        success: bool,
        now: DateTime<Utc>,
    ) -> Option<Result<CardId>> {
        let id = self.current_id()?;
        self.position += 1;

        let outcome = deck.review(id, success, now).map(|_| id);
        if outcome.is_ok() {
            if success {
                self.remembered += 1;
            } else {
                self.forgotten += 1;
            }
        } else {
            log::warn!("Card {} left the deck during the review session", id);
        }
        Some(outcome)
    }

    /// Move past the current card without touching its schedule
    pub fn skip(&mut self) -> Option<CardId> {
        let id = self.current_id()?;
        self.position += 1;
        self.skipped += 1;
        Some(id)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            remembered: self.remembered,
            forgotten: self.forgotten,
            skipped: self.skipped,
            remaining: self.remaining(),
        }
    }
}
