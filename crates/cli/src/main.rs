//! Catalog admin CLI - migrations, seeding and development tokens.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! catalog-cli migrate
//!
//! # Load stores and catalog rows from a YAML file
//! catalog-cli seed crates/cli/fixtures/seed.yaml
//!
//! # Mint a session token for local API calls
//! catalog-cli token --user user_2NNEqL2nrIRdJ194ndJqAHwEfxC --ttl 3600
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Catalog admin CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run catalog database migrations
    Migrate,
    /// Seed stores and catalog rows from a YAML file
    Seed {
        /// Path to the seed file
        file: String,
    },
    /// Mint a development session token
    Token {
        /// User id to put in the `sub` claim
        #[arg(short, long)]
        user: String,

        /// Lifetime in seconds
        #[arg(short, long, default_value_t = 3600)]
        ttl: u64,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Token { user, ttl } => commands::token::run(&user, ttl)?,
    }
    Ok(())
}
