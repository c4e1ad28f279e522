pub mod due;
pub mod intervals;
pub mod review;
pub mod stats;
pub mod tag;

use flashlingo_lib::flashcards::{format_interval, FlashCard};

/// One-line summary of a card for plain output
pub fn card_line(index: usize, card: &FlashCard, now: chrono::DateTime<chrono::Utc>) -> String {
    let tags = card
        .tags()
        .iter()
        .map(|t| format!("[{}]", t))
        .collect::<Vec<_>>()
        .join(" ");
    let due = if card.is_overdue_at(now) {
        "due now".to_string()
    } else {
        format!("due in {}", format_interval(card.due_date() - now))
    };
    format!(
        "{:>3}. {} ({}) -> {} ({})  tier {}  {}  {}",
        index + 1,
        card.original_word(),
        card.original_word().language(),
        card.translated_word(),
        card.translated_word().language(),
        card.proficiency_level().tier(),
        due,
        tags
    )
    .trim_end()
    .to_string()
}
