//! Lingam CLI - Back-office tools for the showroom.
//!
//! # Usage
//!
//! ```bash
//! # Create the PostgreSQL schema
//! lingam migrate
//!
//! # Book a showroom visit and check what is left that day
//! lingam appointments book --name "Lakshmi" --email lakshmi@example.com \
//!     --phone 312-555-0101 --date 2025-06-01 --time 10:00 --purpose custom-order
//! lingam appointments slots --date 2025-06-01
//!
//! # Moderate testimonials
//! lingam testimonials approve 1748736000000
//! lingam testimonials feature 1748736000000
//!
//! # Track a purchase
//! lingam customers purchase 1748736000000
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run `PostgreSQL` migrations
//! - `appointments` - Book, list and manage showroom appointments
//! - `testimonials` - Submit and moderate testimonials
//! - `customers` - Maintain the customer ledger
//!
//! Records are printed to stdout as JSON; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingam_admin::error::Result;
use lingam_admin::{AdminConfig, AppState};

mod commands;

#[derive(Parser)]
#[command(name = "lingam")]
#[command(author, version, about = "Lingam back-office tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run `PostgreSQL` migrations
    Migrate,
    /// Manage showroom appointments
    Appointments {
        #[command(subcommand)]
        action: commands::appointments::AppointmentAction,
    },
    /// Submit and moderate testimonials
    Testimonials {
        #[command(subcommand)]
        action: commands::testimonials::TestimonialAction,
    },
    /// Manage the customer ledger
    Customers {
        #[command(subcommand)]
        action: commands::customers::CustomerAction,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Text logs on stderr by default, JSON when `LINGAM_LOG_FORMAT=json`.
fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingam_admin=info,lingam_cli=info".into());

    let is_json = std::env::var("LINGAM_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = AdminConfig::from_env()?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&config).await,
        Commands::Appointments { action } => {
            let state = AppState::from_config(&config).await?;
            commands::appointments::run(&state, action).await
        }
        Commands::Testimonials { action } => {
            let state = AppState::from_config(&config).await?;
            commands::testimonials::run(&state, action).await
        }
        Commands::Customers { action } => {
            let state = AppState::from_config(&config).await?;
            commands::customers::run(&state, action).await
        }
    }
}
