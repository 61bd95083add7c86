//! Record search indexer entry point.

use tracing::info;
use tracing_subscriber::EnvFilter;

use record_search::{Dependencies, IndexingError};

/// Initialize tracing with env-filter; `LOG_FORMAT=json` switches to
/// structured JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolve once a shutdown signal arrives.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Starting record search indexer");

    let deps = Dependencies::new().await?;

    record_search_api::serve(deps.bind_addr, deps.api_state, shutdown_signal()).await?;

    info!("Record search indexer stopped");
    Ok(())
}
