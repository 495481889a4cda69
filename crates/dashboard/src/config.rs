//! Dashboard configuration
//!
//! Read once from the environment at startup and passed around as an
//! immutable value.

use anyhow::Result;
use std::env;
use std::net::SocketAddr;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the Prometheus-compatible metrics store
    pub prometheus_url: String,

    /// Host override for derived service URLs; `None` means use the
    /// request's Host header (without port)
    pub host_override: Option<String>,

    /// Listen address
    pub address: SocketAddr,

    /// WireGuard guide parameters
    pub wireguard: WireguardConfig,

    /// SSH tunnel guide parameters
    pub ssh: SshConfig,

    /// Log level (trace|debug|info|warn|error)
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct WireguardConfig {
    pub server: String,
    pub port: String,
}

#[derive(Debug, Clone)]
pub struct SshConfig {
    pub host: String,
    pub user: String,
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let address = env::var("DASHBOARD_ADDRESS").unwrap_or_else(|_| "0.0.0.0:80".to_string());
        let address: SocketAddr = address
            .parse()
            .map_err(|_| anyhow::anyhow!("DASHBOARD_ADDRESS has an invalid value: {}", address))?;

        Ok(Self {
            prometheus_url: env::var("PROMETHEUS_URL")
                .unwrap_or_else(|_| "http://prometheus:9090".to_string()),
            host_override: env::var("DASHBOARD_HOST").ok().filter(|h| !h.is_empty()),
            address,
            wireguard: WireguardConfig {
                server: env::var("WG_SERVERURL").unwrap_or_else(|_| "vpn.example.com".to_string()),
                port: env::var("WG_SERVERPORT").unwrap_or_else(|_| "51820".to_string()),
            },
            ssh: SshConfig {
                host: env::var("SSH_HOST").unwrap_or_else(|_| "homelab".to_string()),
                user: env::var("SSH_USER").unwrap_or_else(|_| "admin".to_string()),
            },
            log_level: env::var("DASHBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The host used for derived service URLs
    ///
    /// The override wins when configured; otherwise the request's Host
    /// header, stripped of any port.
    pub fn effective_host(&self, request_host: &str) -> String {
        if let Some(ref host) = self.host_override {
            return host.clone();
        }
        request_host
            .split(':')
            .next()
            .unwrap_or(request_host)
            .to_string()
    }
}
