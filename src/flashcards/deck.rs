//! In-memory flashcard collection with a filtered view
//!
//! Commands address cards by their position in the current filtered view.
//! Every mutating command resets the view to show-all once it has applied
//! its change, so the next command sees the full deck again.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::ReviewPolicy;
use super::errors::{FlashcardError, Result};
use super::models::{CardId, FlashCard};
use super::query::{filter_cards, CardQuery};
use super::tag::Tag;
use super::words::{OriginalWord, TranslatedWord};

/// Counts for a deck, e.g. for a recalled/forgotten chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub mastered_cards: usize,
    pub recalled_cards: usize,
    pub forgotten_cards: usize,
    /// Number of cards at each tier, indexed by tier
    pub cards_per_tier: Vec<usize>,
}

/// Owned collection of flashcards plus the filter of the visible list
#[derive(Debug)]
pub struct FlashcardDeck {
    cards: Vec<FlashCard>,
    policy: ReviewPolicy,
    filter: CardQuery,
}

impl Default for FlashcardDeck {
    fn default() -> Self {
        Self::new(ReviewPolicy::default())
    }
}

impl FlashcardDeck {
    pub fn new(policy: ReviewPolicy) -> Self {
        Self {
            cards: Vec::new(),
            policy,
            filter: CardQuery::show_all(),
        }
    }

    /// Build a deck from imported cards, rejecting duplicates
    pub fn with_cards(policy: ReviewPolicy, cards: Vec<FlashCard>) -> Result<Self> {
        let mut deck = Self::new(policy);
        for card in cards {
            deck.add_card(card)?;
        }
        Ok(deck)
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // ==================== Card Operations ====================

    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }

    /// True if a card with the same word pair exists
    pub fn has_card(&self, card: &FlashCard) -> bool {
        self.cards.iter().any(|c| c.is_same_card(card))
    }

    pub fn get(&self, id: CardId) -> Result<&FlashCard> {
        self.cards
            .iter()
            .find(|c| c.id() == id)
            .ok_or(FlashcardError::NotFound(id))
    }

    fn get_mut(&mut self, id: CardId) -> Result<&mut FlashCard> {
        self.cards
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(FlashcardError::NotFound(id))
    }

    /// Add a card, bounding its level to this deck's policy
    pub fn add_card(&mut self, mut card: FlashCard) -> Result<CardId> {
        card.bind_to_policy(&self.policy)?;
        if self.has_card(&card) {
            return Err(FlashcardError::DuplicateCard(format!(
                "{} / {}",
                card.original_word(),
                card.translated_word()
            )));
        }
        if self.cards.iter().any(|c| c.id() == card.id()) {
            return Err(FlashcardError::invalid(format!(
                "card id {} is already in use",
                card.id()
            )));
        }

        let id = card.id();
        log::debug!("Added flashcard {}: {}", id, card);
        self.cards.push(card);
        Ok(id)
    }

    pub fn delete_card(&mut self, id: CardId) -> Result<FlashCard> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id() == id)
            .ok_or(FlashcardError::NotFound(id))?;
        let removed = self.cards.remove(pos);
        log::debug!("Deleted flashcard {}", id);
        Ok(removed)
    }

    /// Replace the card `id` with `edited`, keeping its position.
    ///
    /// The edited card must not duplicate any other card in the deck.
    pub fn set_card(&mut self, id: CardId, mut edited: FlashCard) -> Result<()> {
        edited.bind_to_policy(&self.policy)?;
        let pos = self
            .cards
            .iter()
            .position(|c| c.id() == id)
            .ok_or(FlashcardError::NotFound(id))?;

        let clashes = self
            .cards
            .iter()
            .enumerate()
            .any(|(i, c)| i != pos && c.is_same_card(&edited));
        if clashes {
            return Err(FlashcardError::DuplicateCard(format!(
                "{} / {}",
                edited.original_word(),
                edited.translated_word()
            )));
        }

        self.cards[pos] = edited.with_id(id);
        log::debug!("Updated flashcard {}", id);
        Ok(())
    }

    // ==================== Id-based Review Operations ====================

    /// Record the outcome of reviewing `id` and reschedule it
    pub fn review(&mut self, id: CardId, success: bool, now: DateTime<Utc>) -> Result<&FlashCard> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(FlashcardError::NotFound(id))?;
        if success {
            card.recall();
        } else {
            card.forget();
        }
        card.update_level_at(success, now, &self.policy);
        log::info!(
            "Reviewed {} ({}): tier {}, next review {}",
            card.original_word(),
            if success { "recalled" } else { "forgotten" },
            card.proficiency_level().tier(),
            card.due_date()
        );
        Ok(&*card)
    }

    pub fn recall(&mut self, id: CardId) -> Result<()> {
        self.get_mut(id)?.recall();
        Ok(())
    }

    pub fn forget(&mut self, id: CardId) -> Result<()> {
        self.get_mut(id)?.forget();
        Ok(())
    }

    pub fn add_tags(&mut self, id: CardId, tags: &BTreeSet<Tag>) -> Result<()> {
        if tags.is_empty() {
            return Err(FlashcardError::EmptyInput("tags"));
        }
        self.get_mut(id)?.add_tags(tags.iter().copied());
        Ok(())
    }

    // ==================== Filtered View ====================

    pub fn filter(&self) -> &CardQuery {
        &self.filter
    }

    pub fn update_filter(&mut self, query: CardQuery) {
        log::debug!("Filter updated: {:?}", query.filters());
        self.filter = query;
    }

    pub fn reset_filter(&mut self) {
        self.update_filter(CardQuery::show_all());
    }

    /// The visible list, recomputed from the current filter
    pub fn filtered_cards(&self, now: DateTime<Utc>) -> Vec<&FlashCard> {
        filter_cards(&self.cards, &self.filter, now)
    }

    /// Cards due for review right now, in deck order
    pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<&FlashCard> {
        filter_cards(&self.cards, &CardQuery::due_for_review(), now)
    }

    /// Resolve a zero-based position in the current view to a card id
    pub fn id_at(&self, index: usize, now: DateTime<Utc>) -> Result<CardId> {
        let view = self.filtered_cards(now);
        view.get(index)
            .map(|c| c.id())
            .ok_or(FlashcardError::OutOfRange {
                index,
                len: view.len(),
            })
    }

    /// Run `apply` on the card at `index` in the view, then show all cards
    fn with_card_at<T>(
        &mut self,
        index: usize,
        now: DateTime<Utc>,
        apply: impl FnOnce(&mut Self, CardId) -> Result<T>,
    ) -> Result<T> {
        let id = self.id_at(index, now)?;
        let result = apply(self, id)?;
        self.reset_filter();
        Ok(result)
    }

    pub fn review_at(&mut self, index: usize, success: bool, now: DateTime<Utc>) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| {
            deck.review(id, success, now)?;
            Ok(id)
        })
    }

    pub fn recall_at(&mut self, index: usize, now: DateTime<Utc>) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| deck.recall(id).map(|_| id))
    }

    pub fn forget_at(&mut self, index: usize, now: DateTime<Utc>) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| deck.forget(id).map(|_| id))
    }

    /// Flip the presentation-only revealed flag
    pub fn reveal_at(&mut self, index: usize, revealed: bool, now: DateTime<Utc>) -> Result<CardId> {
        let id = self.id_at(index, now)?;
        self.get_mut(id)?.set_revealed(revealed);
        Ok(id)
    }

    pub fn add_tags_at(
        &mut self,
        index: usize,
        tags: &BTreeSet<Tag>,
        now: DateTime<Utc>,
    ) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| deck.add_tags(id, tags).map(|_| id))
    }

    pub fn delete_tag_at(&mut self, index: usize, tag: Tag, now: DateTime<Utc>) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| {
            deck.get_mut(id)?.delete_tag(tag);
            Ok(id)
        })
    }

    pub fn replace_tag_at(
        &mut self,
        index: usize,
        original: Tag,
        replacement: Tag,
        now: DateTime<Utc>,
    ) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| {
            deck.get_mut(id)?.replace_tag(original, replacement);
            Ok(id)
        })
    }

    /// Swap the word pair of the card at `index`, keeping its schedule
    pub fn edit_words_at(
        &mut self,
        index: usize,
        original: OriginalWord,
        translated: TranslatedWord,
        now: DateTime<Utc>,
    ) -> Result<CardId> {
        self.with_card_at(index, now, |deck, id| {
            let edited = deck.get(id)?.with_words(original, translated)?;
            deck.set_card(id, edited)?;
            Ok(id)
        })
    }

    // ==================== Statistics ====================

    pub fn stats(&self, now: DateTime<Utc>) -> ReviewStats {
        let mut stats = ReviewStats {
            total_cards: self.cards.len(),
            cards_per_tier: vec![0; self.policy.max_tier() as usize + 1],
            ..ReviewStats::default()
        };

        for card in &self.cards {
            let level = card.proficiency_level();
            if level.is_deleted_from_review() {
                stats.mastered_cards += 1;
            } else if card.is_overdue_at(now) {
                stats.due_cards += 1;
            }

            if card.is_recalled() {
                stats.recalled_cards += 1;
            } else {
                stats.forgotten_cards += 1;
            }

            let tier = level.tier() as usize;
            if tier >= stats.cards_per_tier.len() {
                stats.cards_per_tier.resize(tier + 1, 0);
            }
            stats.cards_per_tier[tier] += 1;
        }

        stats
    }
}
