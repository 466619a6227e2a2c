//! Server entry-point: loads the statutory configuration and serves the API.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/sv".into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        std::io::Error::other(format!("failed to load config from {config_dir}: {e}"))
    })?;
    info!(
        schedule = %config.schedule().code,
        version = %config.schedule().version,
        "Statutory configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Payroll engine listening");
    axum::serve(listener, router).await
}
