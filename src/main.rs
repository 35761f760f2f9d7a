//! pluto - terminal client for a document analysis pipeline.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let verbose = cli::is_verbose();
    cli::tui::set_verbose(verbose);
    let default_filter = if verbose {
        "pluto=info"
    } else {
        "pluto=warn"
    };

    // Logs go to stderr, and are muted under the full-screen view unless verbose
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(cli::tui::log_writer))
        .init();

    cli::run().await
}
