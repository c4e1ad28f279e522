use anyhow::{bail, Result};
use chrono::Utc;

use flashlingo_lib::flashcards::{FlashcardDeck, ReviewSession};

use crate::commands::card_line;
use crate::OutputFormat;

enum Answer {
    Recalled,
    Forgotten,
    Skip,
}

fn parse_answers(answers: &str) -> Result<Vec<Answer>> {
    answers
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_lowercase() {
            'y' => Ok(Answer::Recalled),
            'n' => Ok(Answer::Forgotten),
            's' => Ok(Answer::Skip),
            other => bail!("Unknown answer '{}', expected y, n or s", other),
        })
        .collect()
}

pub fn run(deck: &mut FlashcardDeck, answers: &str, format: &OutputFormat) -> Result<()> {
    let answers = parse_answers(answers)?;
    let now = Utc::now();
    let mut session = ReviewSession::start(deck, now);

    if answers.len() > session.remaining() {
        log::warn!(
            "{} answers given but only {} cards are due; extra answers ignored",
            answers.len(),
            session.remaining()
        );
    }

    let mut reviewed = Vec::new();
    for answer in answers {
        if session.is_finished() {
            break;
        }
        let outcome = match answer {
            Answer::Recalled => session.answer(deck, true, now),
            Answer::Forgotten => session.answer(deck, false, now),
            Answer::Skip => {
                session.skip();
                continue;
            }
        };
        if let Some(result) = outcome {
            reviewed.push(result?);
        }
    }

    let summary = session.summary();
    match format {
        OutputFormat::Json => {
            let cards = reviewed
                .iter()
                .map(|id| deck.get(*id))
                .collect::<Result<Vec<_>, _>>()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "summary": summary,
                    "reviewed": cards,
                }))?
            );
        }
        OutputFormat::Plain => {
            for (i, id) in reviewed.iter().enumerate() {
                println!("{}", card_line(i, deck.get(*id)?, now));
            }
            println!(
                "\n{} remembered, {} forgotten, {} skipped, {} remaining",
                summary.remembered, summary.forgotten, summary.skipped, summary.remaining
            );
        }
    }

    Ok(())
}
