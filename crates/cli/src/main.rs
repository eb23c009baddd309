//! Sandbar CLI - Store data management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write a demo catalog and demo users into ./data
//! sandbar-cli seed
//!
//! # Use a different data directory, overwriting existing users
//! sandbar-cli seed --data-dir /var/lib/sandbar --force
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed the data directory the storefront serves from

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sandbar-cli")]
#[command(author, version, about = "Sandbar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the data directory with a demo catalog and demo users
    Seed {
        /// Directory to write `products.json` and `users.json` into
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Overwrite an existing `users.json` (carts and balances are lost)
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sandbar_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed { data_dir, force } => commands::seed::run(&data_dir, force).await,
    };

    if let Err(e) = result {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}
