// # dashboard
//
// Central landing page for the cluster's services: derived links per
// service, live system stats fetched from the metrics store, and static
// setup guides. Configuration is read from environment variables once at
// startup.

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod metrics;
mod pages;
mod routes;
mod services;

use config::DashboardConfig;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from_env().context("failed to load configuration")?;

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => anyhow::bail!("DASHBOARD_LOG_LEVEL '{}' is not valid", other),
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let address = config.address;
    let state = AppState::new(config);
    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("dashboard listening on {}", address);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
