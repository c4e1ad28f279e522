use anyhow::{Context, Result};

use flashlingo_lib::flashcards::Tag;

use crate::OutputFormat;

pub fn run(name: &str, format: &OutputFormat) -> Result<()> {
    let tag: Tag = name
        .parse()
        .with_context(|| format!("Unknown tag '{}'", name))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "tag": tag }));
        }
        OutputFormat::Plain => {
            println!("{}", tag);
        }
    }

    Ok(())
}
