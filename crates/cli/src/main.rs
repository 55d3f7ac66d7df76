//! regflow: stepper-driven event registration from the terminal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

/// Register for university events with a step-by-step wizard.
///
/// Flows, portal settings and event guidelines are read from the
/// `.regflow/` directory under `--root`.
#[derive(Parser)]
#[command(name = "regflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory containing `.regflow/`
    #[arg(short, long, global = true, default_value = ".", env = "REGFLOW_ROOT")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the registration wizard for an event
    Register {
        /// Event identifier
        #[arg(short, long)]
        event: String,

        /// Flow to use (e.g. solo, team)
        #[arg(short, long, default_value = "solo")]
        flow: String,
    },

    /// List configured flows and their steps
    Flows {
        /// Print flow definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and validate the configuration
    Check,

    /// Create a `.regflow/` directory with templates
    Init {
        /// Overwrite an existing `.regflow/` directory
        #[arg(long)]
        force: bool,

        /// Only write the settings and the solo flow
        #[arg(long)]
        minimal: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Register { event, flow } => {
            // The terminal belongs to the wizard, so logs go to a file.
            let log_path = logging::init_file(cli.verbose, &cli.root)?;
            tracing::debug!(path = %log_path.display(), "logging to file");
            commands::register::run(&cli.root, event, flow).await
        }
        Commands::Flows { json } => {
            logging::init_stderr(cli.verbose);
            commands::flows::run(&cli.root, json).await
        }
        Commands::Check => {
            logging::init_stderr(cli.verbose);
            commands::check::run(&cli.root).await
        }
        Commands::Init { force, minimal } => {
            logging::init_stderr(cli.verbose);
            commands::init::run(&cli.root, force, minimal).await
        }
    }
}
