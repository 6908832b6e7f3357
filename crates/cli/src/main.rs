//! Hotslice CLI - Dataset checks and reports.
//!
//! # Usage
//!
//! ```bash
//! # Check the embedded dataset (or a file) for integrity issues
//! hotslice-cli dataset check
//! hotslice-cli dataset check --file data/mock_data.json
//!
//! # Table sizes and order statuses
//! hotslice-cli dataset summary
//!
//! # Marketplace analytics as text or JSON
//! hotslice-cli analytics
//! hotslice-cli analytics --json
//! ```
//!
//! # Commands
//!
//! - `dataset check` - Exit non-zero and list issues when validation fails
//! - `dataset summary` - Print table counts
//! - `analytics` - Print the seller analytics report

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hotslice-cli")]
#[command(author, version, about = "Hotslice CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the mock dataset
    Dataset {
        #[command(subcommand)]
        action: DatasetAction,
    },
    /// Print the marketplace analytics report
    Analytics {
        /// Dataset file to read instead of the embedded one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum DatasetAction {
    /// Validate referential integrity
    Check {
        /// Dataset file to read instead of the embedded one
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print table counts and order statuses
    Summary {
        /// Dataset file to read instead of the embedded one
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so reports can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotslice_cli=info,hotslice_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = match cli.command {
        Commands::Dataset { action } => match action {
            DatasetAction::Check { file } => {
                let catalog = commands::dataset::load(file.as_deref())?;
                commands::dataset::check(&catalog)?
            }
            DatasetAction::Summary { file } => {
                let catalog = commands::dataset::load(file.as_deref())?;
                commands::dataset::summary(&catalog)
            }
        },
        Commands::Analytics { file, json } => {
            let catalog = commands::dataset::load(file.as_deref())?;
            if json {
                commands::analytics::json(&catalog)?
            } else {
                commands::analytics::text(&catalog)
            }
        }
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
