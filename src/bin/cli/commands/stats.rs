use anyhow::Result;
use chrono::Utc;

use flashlingo_lib::flashcards::FlashcardDeck;

use crate::OutputFormat;

pub fn run(deck: &FlashcardDeck, format: &OutputFormat) -> Result<()> {
    let stats = deck.stats(Utc::now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Total:      {}", stats.total_cards);
            println!("Due:        {}", stats.due_cards);
            println!("Mastered:   {}", stats.mastered_cards);
            println!("Recalled:   {}", stats.recalled_cards);
            println!("Forgotten:  {}", stats.forgotten_cards);
            println!();
            for (tier, count) in stats.cards_per_tier.iter().enumerate() {
                println!("Tier {:<2} {}", tier, count);
            }
        }
    }

    Ok(())
}
