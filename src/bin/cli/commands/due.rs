use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::Utc;

use flashlingo_lib::flashcards::{parse_tags, CardFilter, CardQuery, FlashcardDeck, Tag};

use crate::commands::card_line;
use crate::OutputFormat;

pub fn run(
    deck: &FlashcardDeck,
    language: Option<&str>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = CardQuery::due_for_review();
    if let Some(language) = language {
        query = query.and(CardFilter::Language(language.to_string()));
    }
    if let Some(tags) = tags {
        let tags: BTreeSet<Tag> = parse_tags(tags)
            .context("Invalid --tags")?
            .into_iter()
            .collect();
        if !tags.is_empty() {
            query = query.and(CardFilter::Tags(tags));
        }
    }

    let now = Utc::now();
    let due = flashlingo_lib::flashcards::filter_cards(deck.cards(), &query, now);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing to review.");
                return Ok(());
            }
            for (i, card) in due.iter().enumerate() {
                println!("{}", card_line(i, card, now));
            }
            println!("\n{} cards due", due.len());
        }
    }

    Ok(())
}
