//! Quotewise - insurance quote extraction and comparison.
//!
//! A tool for extracting quote data from insurance documents,
//! ranking plans against a family's risk profile, and producing a
//! recommendation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotewise::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "quotewise=info"
    } else {
        "quotewise=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
