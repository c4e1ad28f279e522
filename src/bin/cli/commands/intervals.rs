use anyhow::Result;

use flashlingo_lib::flashcards::format_interval;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let policy = &app.policy;
    let max_tier = policy.max_tier();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = (0..=max_tier)
                .map(|tier| {
                    serde_json::json!({
                        "tier": tier,
                        "intervalDays": policy.interval(tier).num_days(),
                        "mastered": tier == max_tier,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Tier Interval");
            println!("{} {}", "\u{2500}".repeat(4), "\u{2500}".repeat(8));
            for tier in 0..=max_tier {
                let marker = if tier == max_tier { "  (mastered)" } else { "" };
                println!(
                    "{:<4} {}{}",
                    tier,
                    format_interval(policy.interval(tier)),
                    marker
                );
            }
        }
    }

    Ok(())
}
