//! Data models for the flashcard system

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::ReviewPolicy;
use super::errors::{FlashcardError, Result};
use super::proficiency::ProficiencyLevel;
use super::tag::Tag;
use super::words::{OriginalWord, TranslatedWord};

/// Stable handle for a card inside a deck.
///
/// Not part of card identity: two cards with different ids but the same
/// word pair are still the same card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A word/translation pair under spaced repetition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FlashCardRecord")]
pub struct FlashCard {
    id: CardId,
    original_word: OriginalWord,
    translated_word: TranslatedWord,
    /// When the card is due for review
    when_to_review: DateTime<Utc>,
    level: ProficiencyLevel,
    is_recalled: bool,
    #[serde(skip)]
    is_revealed: bool,
    tags: BTreeSet<Tag>,
}

/// Unvalidated card shape accepted on import
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashCardRecord {
    #[serde(default)]
    pub id: Option<CardId>,
    pub original_word: OriginalWord,
    pub translated_word: TranslatedWord,
    pub when_to_review: DateTime<Utc>,
    #[serde(default)]
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub is_recalled: bool,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl TryFrom<FlashCardRecord> for FlashCard {
    type Error = FlashcardError;

    fn try_from(record: FlashCardRecord) -> Result<Self> {
        let mut card = FlashCard::new(
            record.original_word,
            record.translated_word,
            record.when_to_review,
            record.level,
        )?
        .with_recalled(record.is_recalled)
        .with_tags(record.tags);
        if let Some(id) = record.id {
            card.id = id;
        }
        Ok(card)
    }
}

impl FlashCard {
    /// Create a card. Fails when both words are equal ignoring case.
    pub fn new(
        original_word: OriginalWord,
        translated_word: TranslatedWord,
        when_to_review: DateTime<Utc>,
        level: ProficiencyLevel,
    ) -> Result<Self> {
        if original_word.matches_ignore_case(&translated_word) {
            return Err(FlashcardError::invalid(format!(
                "original and translated words must differ, got '{}' twice",
                original_word
            )));
        }

        Ok(Self {
            id: CardId::new(),
            original_word,
            translated_word,
            when_to_review,
            level,
            is_recalled: false,
            is_revealed: false,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_recalled(mut self, is_recalled: bool) -> Self {
        self.is_recalled = is_recalled;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub(crate) fn with_id(mut self, id: CardId) -> Self {
        self.id = id;
        self
    }

    /// Re-bound the level to a policy's tier range, keeping the tier
    pub(crate) fn bind_to_policy(&mut self, policy: &ReviewPolicy) -> Result<()> {
        self.level = policy.level(self.level.tier())?;
        Ok(())
    }

    /// A copy of this card with a new word pair; schedule, level, and tags are kept
    pub fn with_words(
        &self,
        original_word: OriginalWord,
        translated_word: TranslatedWord,
    ) -> Result<Self> {
        let edited = FlashCard::new(
            original_word,
            translated_word,
            self.when_to_review,
            self.level,
        )?
        .with_recalled(self.is_recalled)
        .with_tags(self.tags.iter().copied())
        .with_id(self.id);
        Ok(edited)
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn original_word(&self) -> &OriginalWord {
        &self.original_word
    }

    pub fn translated_word(&self) -> &TranslatedWord {
        &self.translated_word
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.when_to_review
    }

    /// Snapshot of the current level; transitions go through `update_level`
    pub fn proficiency_level(&self) -> ProficiencyLevel {
        self.level
    }

    pub fn is_deleted_from_review(&self) -> bool {
        self.level.is_deleted_from_review()
    }

    pub fn is_recalled(&self) -> bool {
        self.is_recalled
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn set_revealed(&mut self, is_revealed: bool) {
        self.is_revealed = is_revealed;
    }

    /// Weak equality used for duplicate detection
    pub fn is_same_card(&self, other: &FlashCard) -> bool {
        self.original_word == other.original_word && self.translated_word == other.translated_word
    }

    pub fn recall(&mut self) {
        self.is_recalled = true;
    }

    pub fn forget(&mut self) {
        self.is_recalled = false;
    }

    /// Apply a review outcome at the current time under `policy`
    pub fn update_level(&mut self, success: bool, policy: &ReviewPolicy) {
        self.update_level_at(success, Utc::now(), policy);
    }

    /// Move the tier, then reschedule from the post-transition tier
    pub fn update_level_at(&mut self, success: bool, now: DateTime<Utc>, policy: &ReviewPolicy) {
        if success {
            self.level.upgrade();
        } else {
            self.level.downgrade();
        }
        self.when_to_review = policy.next_review(&self.level, now);
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.when_to_review
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Union the given tags into this card's tag set
    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.tags.extend(tags);
    }

    /// Remove `original` if present, then insert `replacement` regardless
    pub fn replace_tag(&mut self, original: Tag, replacement: Tag) {
        self.tags.remove(&original);
        self.tags.insert(replacement);
    }

    pub fn delete_tag(&mut self, tag: Tag) {
        self.tags.remove(&tag);
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.original_word.has_subpart(keyword) || self.translated_word.has_subpart(keyword)
    }

    pub fn is_same_language(&self, language: &str) -> bool {
        self.original_word.is_same_language(language)
            || self.translated_word.is_same_language(language)
    }
}

impl PartialEq for FlashCard {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_card(other)
    }
}

impl Eq for FlashCard {}

impl fmt::Display for FlashCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | {} ({}) | due {} | level {}",
            self.original_word,
            self.original_word.language(),
            self.translated_word,
            self.translated_word.language(),
            self.when_to_review.format("%Y-%m-%d %H:%M"),
            self.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn card(original: &str, translated: &str) -> FlashCard {
        FlashCard::new(
            OriginalWord::new(original, "German").unwrap(),
            TranslatedWord::new(translated, "English").unwrap(),
            Utc::now(),
            ProficiencyLevel::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_same_words_rejected() {
        let result = FlashCard::new(
            OriginalWord::new("cat", "English").unwrap(),
            TranslatedWord::new("cat", "French").unwrap(),
            Utc::now(),
            ProficiencyLevel::default(),
        );
        assert!(matches!(result, Err(FlashcardError::InvalidArgument(_))));

        let mixed_case = FlashCard::new(
            OriginalWord::new("Haus", "German").unwrap(),
            TranslatedWord::new("haus", "Dutch").unwrap(),
            Utc::now(),
            ProficiencyLevel::default(),
        );
        assert!(mixed_case.is_err());
    }

    #[test]
    fn test_defaults() {
        let c = card("hund", "dog");
        assert!(!c.is_recalled());
        assert!(!c.is_revealed());
        assert!(c.tags().is_empty());
        assert_eq!(c.proficiency_level().tier(), 0);
    }

    #[test]
    fn test_is_same_card_ignores_schedule_and_tags() {
        let a = card("hund", "dog");
        let mut b = card("hund", "dog").with_tags([Tag::Rare]);
        b.update_level_at(true, Utc::now(), &ReviewPolicy::default());

        assert_ne!(a.id(), b.id());
        assert!(a.is_same_card(&b));
        assert_eq!(a, b);

        let c = card("hund", "hound");
        assert!(!a.is_same_card(&c));
        assert_ne!(a, c);
    }

    #[test]
    fn test_recall_and_forget_do_not_touch_level() {
        let mut c = card("hund", "dog");
        let due = c.due_date();

        c.recall();
        assert!(c.is_recalled());
        c.forget();
        assert!(!c.is_recalled());

        assert_eq!(c.proficiency_level().tier(), 0);
        assert_eq!(c.due_date(), due);
    }

    #[test]
    fn test_upgrade_is_monotonic() {
        let policy = ReviewPolicy::default();
        let now = Utc::now();
        let mut c = card("hund", "dog");
        let mut last_tier = c.proficiency_level().tier();
        let mut last_gap = Duration::zero();

        for _ in 0..10 {
            c.update_level_at(true, now, &policy);
            let tier = c.proficiency_level().tier();
            let gap = c.due_date() - now;
            assert!(tier >= last_tier);
            assert!(gap >= last_gap);
            last_tier = tier;
            last_gap = gap;
        }
        assert_eq!(last_tier, policy.max_tier());
        assert!(c.is_deleted_from_review());
    }

    #[test]
    fn test_downgrade_floor_still_reschedules() {
        let policy = ReviewPolicy::default();
        let now = Utc::now();
        let mut c = FlashCard::new(
            OriginalWord::new("hund", "German").unwrap(),
            TranslatedWord::new("dog", "English").unwrap(),
            now - Duration::days(3),
            ProficiencyLevel::default(),
        )
        .unwrap();

        c.update_level_at(false, now, &policy);
        assert_eq!(c.proficiency_level().tier(), 0);
        assert_eq!(c.due_date(), now + policy.interval(0));
    }

    #[test]
    fn test_recompute_uses_post_transition_tier() {
        let policy = ReviewPolicy::default();
        let now = Utc::now();
        let mut c = FlashCard::new(
            OriginalWord::new("hund", "German").unwrap(),
            TranslatedWord::new("dog", "English").unwrap(),
            now,
            policy.level(3).unwrap(),
        )
        .unwrap();

        c.update_level_at(true, now, &policy);
        assert_eq!(c.due_date(), now + policy.interval(4));

        c.update_level_at(false, now, &policy);
        assert_eq!(c.due_date(), now + policy.interval(3));
    }

    #[test]
    fn test_overdue_card_reviewed_successfully() {
        let policy = ReviewPolicy::default();
        let now = Utc::now();
        let mut c = FlashCard::new(
            OriginalWord::new("hund", "German").unwrap(),
            TranslatedWord::new("dog", "English").unwrap(),
            now - Duration::days(1),
            ProficiencyLevel::default(),
        )
        .unwrap();
        assert!(c.is_overdue_at(now));

        c.update_level_at(true, now, &policy);
        assert_eq!(c.proficiency_level().tier(), 1);
        assert_eq!(c.due_date(), now + policy.interval(1));
        assert!(!c.is_overdue_at(now));
    }

    #[test]
    fn test_update_level_uses_wall_clock() {
        let mut c = card("hund", "dog");
        let before = Utc::now();
        c.update_level(true, &ReviewPolicy::default());
        assert!(c.due_date() >= before + Duration::days(2));
        assert!(!c.is_overdue());
    }

    #[test]
    fn test_update_level_follows_bound_policy() {
        let policy = ReviewPolicy::from_days(&[1, 3, 7]).unwrap();
        let mut c = FlashCard::new(
            OriginalWord::new("hund", "German").unwrap(),
            TranslatedWord::new("dog", "English").unwrap(),
            Utc::now(),
            policy.initial_level(),
        )
        .unwrap();

        let before = Utc::now();
        c.update_level(true, &policy);
        let after = Utc::now();
        assert_eq!(c.proficiency_level().tier(), 1);
        assert!(c.due_date() >= before + Duration::days(3));
        assert!(c.due_date() <= after + Duration::days(3));

        c.update_level(true, &policy);
        assert!(c.is_deleted_from_review());
    }

    #[test]
    fn test_update_level_with_century_interval() {
        let policy = ReviewPolicy::from_days(&[1, 36_500]).unwrap();
        let mut c = card("hund", "dog");
        c.bind_to_policy(&policy).unwrap();
        let now = Utc::now();
        c.update_level_at(true, now, &policy);
        assert_eq!(c.due_date(), now + Duration::days(36_500));
    }

    #[test]
    fn test_overdue_at_exact_due_time() {
        let now = Utc::now();
        let c = FlashCard::new(
            OriginalWord::new("hund", "German").unwrap(),
            TranslatedWord::new("dog", "English").unwrap(),
            now,
            ProficiencyLevel::default(),
        )
        .unwrap();
        assert!(c.is_overdue_at(now));
        assert!(!c.is_overdue_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_add_tags_is_idempotent() {
        let mut c = card("hund", "dog");
        c.add_tags(["Essentials".parse::<Tag>().unwrap()]);
        c.add_tags(["essentials".parse::<Tag>().unwrap()]);
        assert_eq!(c.tags().len(), 1);
        assert!(c.has_tag(Tag::Essentials));
    }

    #[test]
    fn test_replace_tag() {
        let mut c = card("hund", "dog").with_tags([Tag::Essentials]);
        c.replace_tag(Tag::Essentials, Tag::Uncommon);
        assert!(!c.has_tag(Tag::Essentials));
        assert!(c.has_tag(Tag::Uncommon));
        assert_eq!(c.tags().len(), 1);
    }

    #[test]
    fn test_replace_missing_tag_still_inserts_replacement() {
        let mut c = card("hund", "dog").with_tags([Tag::Rare]);
        c.replace_tag(Tag::Slang, Tag::Uncommon);
        assert!(c.has_tag(Tag::Rare));
        assert!(c.has_tag(Tag::Uncommon));
        assert_eq!(c.tags().len(), 2);
    }

    #[test]
    fn test_delete_tag() {
        let mut c = card("hund", "dog").with_tags([Tag::Rare, Tag::Slang]);
        c.delete_tag(Tag::Rare);
        assert!(!c.has_tag(Tag::Rare));

        c.delete_tag(Tag::Essentials);
        assert_eq!(c.tags().len(), 1);
    }

    #[test]
    fn test_has_keyword_and_language() {
        let c = card("schmetterling", "butterfly");
        assert!(c.has_keyword("metter"));
        assert!(c.has_keyword("fly"));
        assert!(!c.has_keyword("moth"));

        assert!(c.is_same_language("German"));
        assert!(c.is_same_language("English"));
        assert!(!c.is_same_language("French"));
    }

    #[test]
    fn test_with_words_keeps_schedule() {
        let policy = ReviewPolicy::default();
        let mut c = card("hund", "dog").with_tags([Tag::Essentials]);
        c.update_level_at(true, Utc::now(), &policy);

        let edited = c
            .with_words(
                OriginalWord::new("Hund", "German").unwrap(),
                TranslatedWord::new("hound", "English").unwrap(),
            )
            .unwrap();
        assert_eq!(edited.id(), c.id());
        assert_eq!(edited.due_date(), c.due_date());
        assert_eq!(edited.proficiency_level(), c.proficiency_level());
        assert!(edited.has_tag(Tag::Essentials));

        let same = c.with_words(
            OriginalWord::new("dog", "English").unwrap(),
            TranslatedWord::new("DOG", "English").unwrap(),
        );
        assert!(same.is_err());
    }

    #[test]
    fn test_deserialize_validates_words() {
        let json = r#"{
            "originalWord": {"text": "hund", "language": "German"},
            "translatedWord": {"text": "dog", "language": "English"},
            "whenToReview": "2026-01-01T00:00:00Z",
            "level": {"tier": 2},
            "tags": ["essentials"]
        }"#;
        let c: FlashCard = serde_json::from_str(json).unwrap();
        assert_eq!(c.proficiency_level().tier(), 2);
        assert!(c.has_tag(Tag::Essentials));

        let same = r#"{
            "originalWord": {"text": "cat", "language": "English"},
            "translatedWord": {"text": "Cat", "language": "French"},
            "whenToReview": "2026-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<FlashCard>(same).is_err());
    }

    #[test]
    fn test_serialize_round_trip_keeps_id() {
        let c = card("hund", "dog").with_tags([Tag::Slang]);
        let json = serde_json::to_string(&c).unwrap();
        let back: FlashCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), c.id());
        assert_eq!(back, c);
        assert!(back.has_tag(Tag::Slang));
    }
}
