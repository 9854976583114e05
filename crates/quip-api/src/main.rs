//! Quip API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p quip-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use quip_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format can follow the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        worker_id = config.snowflake.worker_id,
        "Starting Quip API Server..."
    );

    quip_api::run(config).await?;

    Ok(())
}
