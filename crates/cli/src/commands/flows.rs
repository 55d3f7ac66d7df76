//! `regflow flows` command implementation

use color_eyre::eyre::Result;
use colored::Colorize;
use rf_protocol::flow_models::FlowKind;
use std::path::Path;

pub async fn run(root: &Path, json: bool) -> Result<()> {
    let config = super::load(root).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.flows)?);
        return Ok(());
    }

    for flow in &config.flows {
        let kind = match flow.kind {
            FlowKind::Solo => "solo",
            FlowKind::Team => "team",
        };
        println!("{} ({kind}, {} steps)", flow.name.bold(), flow.len());
        for (index, step) in flow.steps.iter().enumerate() {
            let marker = if flow.terminal_content_index() == Some(index) {
                " submits".dimmed().to_string()
            } else {
                String::new()
            };
            println!("  {}. {}{marker}", index + 1, step.label);
        }
    }
    Ok(())
}
