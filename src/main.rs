//! Patron - Customer-facing loyalty assistant server
//!
//! CLI entry point for the Patron server.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patron=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !std::path::Path::new(".env").exists() {
        warn!(".env file not found; relying on process environment");
    }

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
