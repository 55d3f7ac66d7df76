//! Subcommand implementations.

pub mod check;
pub mod flows;
pub mod init;
pub mod register;

use color_eyre::eyre::{eyre, Result};
use rf_core::config::loader::load_config;
use rf_core::config::models::AppConfig;
use std::path::Path;

/// Load the configuration under `root`, with the file path in the error.
pub async fn load(root: &Path) -> Result<AppConfig> {
    load_config(root)
        .await
        .map_err(|e| eyre!("Failed to load configuration: {e}"))
}
