// # HTTP IP Lookup
//
// This crate provides the HTTP-based public IP discovery for the homelab
// DDNS reconciler.
//
// ## Architecture
//
// Queries an ordered fallback list of plain-text endpoints (each returns
// the caller's IP as the full response body) and returns the first
// non-empty trimmed body. The list is configuration, not logic: it is
// injectable so deployments can swap endpoints and tests can point at
// stub servers.
//
// No IP format validation is performed beyond whitespace trimming.

use async_trait::async_trait;
use homelab_ddns::{Error, IpLookup, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-endpoint request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default ordered fallback list of IP lookup endpoints
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://icanhazip.com",
    "https://ifconfig.me/ip",
];

/// HTTP-based public IP lookup over an ordered endpoint list
pub struct HttpIpLookup {
    /// Endpoints queried in order until one responds
    endpoints: Vec<String>,

    /// HTTP client with a bounded per-request timeout
    client: reqwest::Client,
}

impl HttpIpLookup {
    /// Create a lookup over the default endpoint list
    pub fn new() -> Self {
        Self::with_endpoints(DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a lookup over a custom ordered endpoint list
    pub fn with_endpoints(endpoints: Vec<String>) -> Self {
        Self::with_endpoints_and_timeout(endpoints, DEFAULT_TIMEOUT)
    }

    /// Create a lookup with a custom endpoint list and timeout
    pub fn with_endpoints_and_timeout(endpoints: Vec<String>, timeout: Duration) -> Self {
        Self {
            endpoints,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// The configured endpoint list, in query order
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Query one endpoint for the caller's IP
    async fn fetch_from(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| Error::ip_lookup(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_lookup(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_lookup(format!("failed to read response: {}", e)))?;

        let ip = body.trim();
        if ip.is_empty() {
            return Err(Error::ip_lookup("empty response body"));
        }

        Ok(ip.to_string())
    }
}

impl Default for HttpIpLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IpLookup for HttpIpLookup {
    async fn current_ip(&self) -> Result<String> {
        for endpoint in &self.endpoints {
            match self.fetch_from(endpoint).await {
                Ok(ip) => {
                    debug!("resolved public IP {} via {}", ip, endpoint);
                    return Ok(ip);
                }
                Err(e) => {
                    warn!("IP lookup via {} failed: {}", endpoint, e);
                }
            }
        }

        Err(Error::NoIpAvailable)
    }
}
