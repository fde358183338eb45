//! Atlas - Main Entry Point
//!
//! Loads configuration, runs one ingestion and prints the resulting assets
//! as JSON on stdout. Logs go to stderr; Ctrl-C cancels the run.

use atlas_infrastructure::{IngestConfig, ingest_with_config};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = IngestConfig::load()?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling ingestion");
            on_signal.cancel();
        }
    });

    tracing::info!(base_url = %config.base_url, "Starting Atlas v{}", env!("CARGO_PKG_VERSION"));

    let output = ingest_with_config(&config, &cancel).await?;

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "assets": output.assets }))?);

    Ok(())
}
