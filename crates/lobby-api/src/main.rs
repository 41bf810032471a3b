//! Lobby API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lobby-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use lobby_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env before tracing reads LOG_FORMAT / RUST_LOG
    AppConfig::load_dotenv();

    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Lobby API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        store = config.store.name(),
        "Configuration loaded"
    );

    lobby_api::run(config).await?;

    Ok(())
}
