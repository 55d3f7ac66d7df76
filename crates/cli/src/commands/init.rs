//! `regflow init` command implementation

use color_eyre::eyre::Result;
use colored::Colorize;
use rf_core::config::CONFIG_DIR;
use rf_core::init::{generate_regflow_structure, InitOptions};
use std::path::Path;

pub async fn run(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_regflow_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    println!(
        "{} Initialized {}",
        "✓".green().bold(),
        root.join(CONFIG_DIR).display()
    );
    for path in &written {
        println!("  {CONFIG_DIR}/{path}");
    }
    println!();
    println!("Next: regflow register --event <event-id> --flow solo");
    Ok(())
}
