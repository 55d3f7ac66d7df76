//! `regflow check` command implementation

use color_eyre::eyre::Result;
use colored::Colorize;
use rf_core::config::CONFIG_DIR;
use rf_protocol::flow_models::StepKind;
use std::path::Path;

pub async fn run(root: &Path) -> Result<()> {
    let rf_dir = root.join(CONFIG_DIR);
    if !rf_dir.is_dir() {
        println!(
            "{} No {CONFIG_DIR}/ directory, using built-in defaults. Run `regflow init` to create one.",
            "!".yellow().bold()
        );
    }

    let config = super::load(root).await?;

    println!(
        "{} Portal: hand-off after {} ms to {}, {} team member slots",
        "✓".green().bold(),
        config.portal.completion_delay_ms,
        config.portal.redirect_path,
        config.portal.team_member_slots
    );

    for flow in &config.flows {
        let uploads = flow
            .steps
            .iter()
            .any(|step| step.kind == StepKind::UploadDocuments);
        println!("{} Flow {} ({} steps)", "✓".green().bold(), flow.name, flow.len());
        if !uploads {
            println!("  {} flow does not collect documents", "!".yellow().bold());
        }
    }

    for guideline in &config.guidelines {
        println!(
            "{} Guideline for {}: {}",
            "✓".green().bold(),
            guideline.event_id,
            guideline.title
        );
    }

    println!("{}", "Configuration OK".green());
    Ok(())
}
