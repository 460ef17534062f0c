//! CLI module for Patron

use clap::{Parser, Subcommand};
use patron_client::{LoyaltyClient, RedemptionFlow};

/// Patron loyalty assistant CLI
#[derive(Parser, Debug)]
#[command(name = "patron")]
#[command(about = "Customer-facing loyalty assistant server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve,
    /// Look up a customer's loyalty dashboard
    Points {
        /// Phone number in international format (e.g., +263775123456)
        phone: String,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) | None => crate::server::run().await,
        Some(Commands::Points { phone }) => points(&phone).await,
    }
}

/// Print a customer's dashboard to stdout
async fn points(phone: &str) -> anyhow::Result<()> {
    let backend_url = std::env::var("BACKEND_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = LoyaltyClient::new(backend_url)?;

    let dashboard = client.load_dashboard(phone).await?;

    println!("Points balance: {}", dashboard.points.total_points);

    if !dashboard.points.recent_transactions.is_empty() {
        println!("\nRecent transactions:");
        for tx in &dashboard.points.recent_transactions {
            println!(
                "  {:>6} pts  {}",
                tx.points_earned.unwrap_or(0),
                tx.business_name.as_deref().unwrap_or("(unknown business)"),
            );
        }
    }

    if !dashboard.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &dashboard.recommendations {
            println!("  - {recommendation}");
        }
    }

    if !dashboard.rewards.is_empty() {
        println!("\nAvailable rewards:");
        for offer in &dashboard.rewards {
            let marker = if RedemptionFlow::can_redeem(offer) {
                "redeemable"
            } else {
                "locked"
            };
            println!(
                "  [{marker}] {} ({} pts)",
                offer.reward.name, offer.reward.points_required
            );
        }
    }

    Ok(())
}
