//! Sheetsmith CLI binary.

use anyhow::Result;
use sheetsmith::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the sheetsmith CLI.
///
/// Uses tokio's current_thread runtime: the work is one sequential read
/// followed by one write.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=sheetsmith=debug,sheetsmith_jsonl=trace sheetsmith convert data.jsonl
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sheetsmith=info,sheetsmith_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting sheetsmith CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Sheetsmith CLI completed successfully");
    Ok(())
}
