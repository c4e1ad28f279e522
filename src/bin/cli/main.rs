mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashlingo-cli", about = "Flashlingo spaced repetition CLI", version)]
struct Cli {
    /// Use a specific config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show the review interval for every proficiency tier
    Intervals,

    /// Validate a tag name and print its canonical form
    Tag {
        /// Tag name (case-insensitive)
        name: String,
    },

    /// List cards that are due for review
    Due {
        /// JSON file with an array of cards to import
        #[arg(long)]
        cards: PathBuf,
        /// Only cards in this language
        #[arg(long)]
        language: Option<String>,
        /// Comma-separated tags; cards must carry at least one
        #[arg(long)]
        tags: Option<String>,
    },

    /// Show review statistics for a set of cards
    Stats {
        /// JSON file with an array of cards to import
        #[arg(long)]
        cards: PathBuf,
    },

    /// Run a scripted review session and print the new schedule
    Review {
        /// JSON file with an array of cards to import
        #[arg(long)]
        cards: PathBuf,
        /// One answer per due card: y (recalled), n (forgotten), s (skip)
        #[arg(long)]
        answers: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Intervals => {
            commands::intervals::run(&app, &cli.format)?;
        }
        Command::Tag { name } => {
            commands::tag::run(&name, &cli.format)?;
        }
        Command::Due { cards, language, tags } => {
            let deck = app.load_deck(&cards)?;
            commands::due::run(&deck, language.as_deref(), tags.as_deref(), &cli.format)?;
        }
        Command::Stats { cards } => {
            let deck = app.load_deck(&cards)?;
            commands::stats::run(&deck, &cli.format)?;
        }
        Command::Review { cards, answers } => {
            let mut deck = app.load_deck(&cards)?;
            commands::review::run(&mut deck, &answers, &cli.format)?;
        }
    }

    Ok(())
}
