//! Predicate filtering over flashcard collections
//!
//! Filters are plain values evaluated against a card and the current time.
//! A `CardQuery` combines any number of them with logical AND; the empty
//! query shows every card.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::FlashCard;
use super::tag::Tag;

/// A single predicate over a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CardFilter {
    /// Always matches
    ShowAll,
    /// Overdue and not yet mastered
    DueForReview,
    /// Either word contains the text
    Keyword(String),
    /// Either word is in the language
    Language(String),
    /// The card carries at least one of the tags
    Tags(BTreeSet<Tag>),
}

impl CardFilter {
    pub fn matches(&self, card: &FlashCard, now: DateTime<Utc>) -> bool {
        match self {
            Self::ShowAll => true,
            Self::DueForReview => card.is_overdue_at(now) && !card.is_deleted_from_review(),
            Self::Keyword(text) => card.has_keyword(text),
            Self::Language(language) => card.is_same_language(language),
            Self::Tags(tags) => !card.tags().is_disjoint(tags),
        }
    }
}

/// Conjunction of filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuery {
    filters: Vec<CardFilter>,
}

impl CardQuery {
    pub fn show_all() -> Self {
        Self::default()
    }

    pub fn due_for_review() -> Self {
        Self::show_all().and(CardFilter::DueForReview)
    }

    pub fn and(mut self, filter: CardFilter) -> Self {
        if filter != CardFilter::ShowAll {
            self.filters.push(filter);
        }
        self
    }

    pub fn filters(&self) -> &[CardFilter] {
        &self.filters
    }

    pub fn is_show_all(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, card: &FlashCard, now: DateTime<Utc>) -> bool {
        self.filters.iter().all(|f| f.matches(card, now))
    }
}

impl From<CardFilter> for CardQuery {
    fn from(filter: CardFilter) -> Self {
        CardQuery::show_all().and(filter)
    }
}

/// Cards matching `query`, in their original order
pub fn filter_cards<'a>(
    cards: &'a [FlashCard],
    query: &CardQuery,
    now: DateTime<Utc>,
) -> Vec<&'a FlashCard> {
    cards.iter().filter(|c| query.matches(c, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::{OriginalWord, ProficiencyLevel, ReviewPolicy, TranslatedWord};
    use chrono::Duration;

    fn card(original: &str, language: &str, translated: &str, due: DateTime<Utc>) -> FlashCard {
        FlashCard::new(
            OriginalWord::new(original, language).unwrap(),
            TranslatedWord::new(translated, "English").unwrap(),
            due,
            ProficiencyLevel::default(),
        )
        .unwrap()
    }

    fn sample(now: DateTime<Utc>) -> Vec<FlashCard> {
        vec![
            card("hund", "German", "dog", now - Duration::days(1)).with_tags([Tag::Essentials]),
            card("chat", "French", "cat", now + Duration::days(2)).with_tags([Tag::Rare]),
            card("katze", "German", "cat", now + Duration::days(1)),
            card("bouffer", "French", "eat", now - Duration::hours(1)).with_tags([Tag::Slang]),
        ]
    }

    fn words<'a>(cards: &[&'a FlashCard]) -> Vec<&'a str> {
        cards.iter().map(|c| c.original_word().text()).collect()
    }

    #[test]
    fn test_show_all_keeps_order() {
        let now = Utc::now();
        let cards = sample(now);
        let all = filter_cards(&cards, &CardQuery::show_all(), now);
        assert_eq!(words(&all), vec!["hund", "chat", "katze", "bouffer"]);
    }

    #[test]
    fn test_due_for_review() {
        let now = Utc::now();
        let cards = sample(now);
        let due = filter_cards(&cards, &CardQuery::due_for_review(), now);
        assert_eq!(words(&due), vec!["hund", "bouffer"]);
    }

    #[test]
    fn test_due_for_review_skips_mastered() {
        let now = Utc::now();
        let policy = ReviewPolicy::default();
        let mastered = FlashCard::new(
            OriginalWord::new("haus", "German").unwrap(),
            TranslatedWord::new("house", "English").unwrap(),
            now - Duration::days(5),
            policy.level(policy.max_tier()).unwrap(),
        )
        .unwrap();

        assert!(mastered.is_overdue_at(now));
        assert!(!CardFilter::DueForReview.matches(&mastered, now));
        assert!(CardFilter::ShowAll.matches(&mastered, now));
    }

    #[test]
    fn test_keyword_and_language() {
        let now = Utc::now();
        let cards = sample(now);

        let cat = filter_cards(&cards, &CardFilter::Keyword("cat".into()).into(), now);
        assert_eq!(words(&cat), vec!["chat", "katze"]);

        let german = filter_cards(&cards, &CardFilter::Language("German".into()).into(), now);
        assert_eq!(words(&german), vec!["hund", "katze"]);
    }

    #[test]
    fn test_tag_filter_intersects() {
        let now = Utc::now();
        let cards = sample(now);
        let wanted: BTreeSet<Tag> = [Tag::Rare, Tag::Slang].into_iter().collect();
        let tagged = filter_cards(&cards, &CardFilter::Tags(wanted).into(), now);
        assert_eq!(words(&tagged), vec!["chat", "bouffer"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let now = Utc::now();
        let cards = sample(now);
        let query = CardQuery::due_for_review().and(CardFilter::Language("French".into()));
        let result = filter_cards(&cards, &query, now);
        assert_eq!(words(&result), vec!["bouffer"]);
    }

    #[test]
    fn test_show_all_filter_is_identity() {
        let query = CardQuery::show_all().and(CardFilter::ShowAll);
        assert!(query.is_show_all());
    }

    #[test]
    fn test_tag_round_trip() {
        let now = Utc::now();
        let mut cards = sample(now);
        let query: CardQuery = CardFilter::Tags([Tag::Uncommon].into_iter().collect()).into();

        cards[2].add_tags([Tag::Uncommon]);
        assert_eq!(words(&filter_cards(&cards, &query, now)), vec!["katze"]);

        cards[2].delete_tag(Tag::Uncommon);
        assert!(filter_cards(&cards, &query, now).is_empty());
    }
}
