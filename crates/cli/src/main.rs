//! BigCartel → Printify bridge CLI - one-shot operator commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the current SKU → Printify variant mappings
//! bridge-cli skus
//! bridge-cli skus --json
//!
//! # Push Printify availability to BigCartel once
//! bridge-cli sync-inventory
//!
//! # Replay an order file (direct form by default)
//! bridge-cli submit order.json --dry-run
//! bridge-cli submit webhook-order.json --webhook
//! ```
//!
//! Configuration is read from the same environment variables as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output goes to stdout; diagnostics go through tracing
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(author, version, about = "BigCartel → Printify bridge operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the SKU mapping from the Printify catalog and print it
    Skus {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one inventory reconciliation against BigCartel
    SyncInventory,
    /// Translate an order JSON file and submit it to Printify
    Submit {
        /// Path to the order JSON
        file: PathBuf,

        /// The file is a BigCartel webhook payload (SKUs resolved via catalog)
        #[arg(long)]
        webhook: bool,

        /// Print the translated request without submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Skus { json } => commands::skus::run(json).await?,
        Commands::SyncInventory => commands::inventory::run().await?,
        Commands::Submit {
            file,
            webhook,
            dry_run,
        } => commands::submit::run(&file, webhook, dry_run).await?,
    }
    Ok(())
}
