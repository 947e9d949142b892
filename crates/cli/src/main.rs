//! Loantrack CLI - terminal front-end for the loan-disbursement tracking API.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password read from stdin when not given)
//! loantrack login -u aknight
//!
//! # Headline figures and alert counts
//! loantrack dashboard
//!
//! # Browse resources
//! loantrack clients list --search diallo
//! loantrack loans show 42
//! loantrack disbursements list --loan-id 42
//! loantrack alerts list --severity RED
//!
//! # Act on resources (role-restricted)
//! loantrack disbursements approve 7
//! loantrack alerts resolve 5
//! ```
//!
//! # Environment Variables
//!
//! - `LOANTRACK_API_URL` - Base URL of the loan-tracking API (required)
//! - `LOANTRACK_SESSION_FILE` - Persisted session location (optional)
//! - `LOANTRACK_PASSWORD` - Password for `login` (optional, avoids prompt)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Screens render to stdout and prompts go to stderr; that is this
// binary's job.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use loantrack_client::session::FileSessionStorage;
use loantrack_client::{ApiClient, Config, QueryCache, SessionStore};

mod commands;
mod render;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "loantrack")]
#[command(author, version, about = "Terminal client for the loan-disbursement tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the API
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password (discouraged on shared machines; prefer the prompt or
        /// `LOANTRACK_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in identity, verified against the API
    Whoami,
    /// Headline figures and alert counts
    Dashboard,
    /// Browse clients
    Clients {
        #[command(subcommand)]
        action: commands::clients::ClientAction,
    },
    /// Browse loans
    Loans {
        #[command(subcommand)]
        action: commands::loans::LoanAction,
    },
    /// Browse and act on disbursements
    Disbursements {
        #[command(subcommand)]
        action: commands::disbursements::DisbursementAction,
    },
    /// Browse and act on alerts
    Alerts {
        #[command(subcommand)]
        action: commands::alerts::AlertAction,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Boot sequence: rehydrate the persisted session, then derive the
    // authenticated flag before the first guard evaluation.
    let store = SessionStore::open(Box::new(FileSessionStorage::new(
        config.session_file.clone(),
    )));
    store.check_auth();

    let api = ApiClient::new(&config, Arc::new(store.clone()));
    let ctx = AppContext {
        store,
        api,
        cache: QueryCache::default(),
    };

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Dashboard => commands::dashboard::show(&ctx).await?,
        Commands::Clients { action } => commands::clients::run(&ctx, action).await?,
        Commands::Loans { action } => commands::loans::run(&ctx, action).await?,
        Commands::Disbursements { action } => commands::disbursements::run(&ctx, action).await?,
        Commands::Alerts { action } => commands::alerts::run(&ctx, action).await?,
    }
    Ok(())
}
