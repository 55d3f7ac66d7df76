//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the `--verbose` default.

use rf_core::config::CONFIG_DIR;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "regflow.log";

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "rf_core=debug,rf_tui=debug,regflow=debug"
    } else {
        "rf_core=info,rf_tui=info,regflow=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `.regflow/regflow.log`, or to the temp directory when there is no
/// `.regflow/` yet.
pub fn init_file(verbose: bool, root: &Path) -> color_eyre::Result<PathBuf> {
    let dir = root.join(CONFIG_DIR);
    let path = if dir.is_dir() {
        dir.join(LOG_FILE)
    } else {
        std::env::temp_dir().join(LOG_FILE)
    };
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(path)
}
