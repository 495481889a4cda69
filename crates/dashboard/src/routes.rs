//! Route definitions and handlers

use crate::config::DashboardConfig;
use crate::metrics::PrometheusClient;
use crate::pages::{self, Guide};
use crate::services::SERVICES;
use axum::{
    extract::{Host, Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state: immutable config plus the metrics client
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub prometheus: Arc<PrometheusClient>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let prometheus = PrometheusClient::new(config.prometheus_url.clone());
        Self {
            config: Arc::new(config),
            prometheus: Arc::new(prometheus),
        }
    }
}

/// Build all the routes for the service
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/wireguard", get(wireguard_index))
        .route("/wireguard/:platform", get(wireguard_platform))
        .route("/ssh-tunnel", get(ssh_tunnel_index))
        .route("/ssh-tunnel/:platform", get(ssh_tunnel_platform))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Landing page with service links and system stats
async fn index(State(state): State<AppState>, Host(host): Host) -> Html<String> {
    let host = state.config.effective_host(&host);
    let stats = state.prometheus.system_stats().await;
    Html(pages::index(&host, SERVICES, &stats))
}

async fn wireguard_index() -> Html<String> {
    Html(pages::guide_index(Guide::Wireguard))
}

async fn wireguard_platform(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> (StatusCode, Html<String>) {
    guide_page(Guide::Wireguard, &platform, &state.config)
}

async fn ssh_tunnel_index() -> Html<String> {
    Html(pages::guide_index(Guide::SshTunnel))
}

async fn ssh_tunnel_platform(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> (StatusCode, Html<String>) {
    guide_page(Guide::SshTunnel, &platform, &state.config)
}

/// Render a platform guide, falling back to the guide index with 404 for
/// anything outside the allow-list
fn guide_page(
    guide: Guide,
    segment: &str,
    config: &DashboardConfig,
) -> (StatusCode, Html<String>) {
    match guide.platform(segment) {
        Some(platform) => (
            StatusCode::OK,
            Html(pages::guide_platform(guide, platform, config)),
        ),
        None => (StatusCode::NOT_FOUND, Html(pages::guide_index(guide))),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
