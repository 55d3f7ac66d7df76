//! `regflow register` command implementation

use color_eyre::eyre::{bail, eyre, Result};
use colored::Colorize;
use rf_tui::{run_app, RunOptions};
use std::path::Path;

pub async fn run(root: &Path, event: String, flow: String) -> Result<()> {
    let config = super::load(root).await?;

    if config.flow(&flow).is_none() {
        let available: Vec<&str> = config.flows.iter().map(|f| f.name.as_str()).collect();
        bail!(
            "Unknown flow '{flow}'. Available flows: {}",
            available.join(", ")
        );
    }
    tracing::info!(event_id = %event, flow = %flow, "starting registration");

    let outcome = run_app(RunOptions {
        config,
        event_id: event.clone(),
        flow_name: flow,
    })
    .await
    .map_err(|e| eyre!(e))?;

    match outcome.result {
        Some(result) => {
            println!(
                "{} Registration for {} submitted.",
                "✓".green().bold(),
                event.bold()
            );
            println!("  Receipt: {}", result.receipt.to_string().cyan());
            if let Some(path) = outcome.redirect {
                println!("  Continue at {}", path.underline());
            }
        }
        None => println!("{} Registration not submitted.", "!".yellow().bold()),
    }
    Ok(())
}
