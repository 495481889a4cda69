//! System metrics fetch
//!
//! Executes a fixed set of scalar PromQL queries against the metrics
//! store. Failure policy: any failure (transport, non-success status,
//! missing result series, malformed value) degrades the corresponding
//! metric to `None`; the page always renders.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Per-query request timeout
const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;

/// CPU usage, percent
const CPU_QUERY: &str = r#"100 - (avg(rate(node_cpu_seconds_total{mode="idle"}[1m])) * 100)"#;

/// Memory usage, percent
const MEMORY_QUERY: &str =
    "100 * (1 - (node_memory_MemAvailable_bytes / node_memory_MemTotal_bytes))";

/// Total memory, bytes
const MEMORY_TOTAL_QUERY: &str = "node_memory_MemTotal_bytes";

/// Root filesystem usage, percent
const DISK_QUERY: &str = r#"100 - (node_filesystem_avail_bytes{mountpoint="/"} / node_filesystem_size_bytes{mountpoint="/"} * 100)"#;

/// Root filesystem size, bytes
const DISK_TOTAL_QUERY: &str = r#"node_filesystem_size_bytes{mountpoint="/"}"#;

/// Host uptime, seconds
const UPTIME_QUERY: &str = "node_time_seconds - node_boot_time_seconds";

/// Snapshot of system stats for the landing page
///
/// Every field is optional: a metric the backend could not answer renders
/// as unknown instead of failing the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemStats {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub memory_total_gb: Option<f64>,
    pub disk: Option<f64>,
    pub disk_total_gb: Option<f64>,
    pub uptime: Option<String>,
}

/// Instant-query response envelope
#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    data: QueryData,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    result: Vec<InstantSample>,
}

/// One instant sample: `[timestamp, "value"]`
#[derive(Debug, Deserialize)]
struct InstantSample {
    value: (f64, String),
}

/// Extract the first sample's scalar value from a query response body
fn extract_value(body: &str) -> Option<f64> {
    let response: QueryResponse = serde_json::from_str(body).ok()?;
    if response.status != "success" {
        return None;
    }
    let sample = response.data.result.first()?;
    sample.value.1.parse().ok()
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a seconds count as `{days}d {hours}h {minutes}m`
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

/// Client for the metrics store's instant-query endpoint
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    base_url: String,
    client: reqwest::Client,
}

impl PrometheusClient {
    /// Create a client against a metrics store base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(QUERY_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Execute one instant query, degrading any failure to `None`
    pub async fn query(&self, query: &str) -> Option<f64> {
        let url = format!("{}/api/v1/query", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("metrics query failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("metrics query returned HTTP {}", response.status());
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("failed to read metrics response: {}", e);
                return None;
            }
        };

        extract_value(&body)
    }

    /// Fetch the full stats snapshot for the landing page
    pub async fn system_stats(&self) -> SystemStats {
        SystemStats {
            cpu: self.query(CPU_QUERY).await.map(round1),
            memory: self.query(MEMORY_QUERY).await.map(round1),
            memory_total_gb: self
                .query(MEMORY_TOTAL_QUERY)
                .await
                .map(|bytes| round1(bytes / BYTES_PER_GB)),
            disk: self.query(DISK_QUERY).await.map(round1),
            disk_total_gb: self
                .query(DISK_TOTAL_QUERY)
                .await
                .map(|bytes| round1(bytes / BYTES_PER_GB)),
            uptime: self
                .query(UPTIME_QUERY)
                .await
                .map(|seconds| format_uptime(seconds as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_rounds_to_one_decimal() {
        assert_eq!(round1(42.35), 42.4);
        assert_eq!(round1(42.34), 42.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn format_uptime_splits_days_hours_minutes() {
        assert_eq!(format_uptime(0), "0d 0h 0m");
        assert_eq!(format_uptime(59), "0d 0h 0m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(3 * 86_400 + 5 * 3_600 + 42 * 60), "3d 5h 42m");
    }

    #[test]
    fn extract_value_reads_first_sample() {
        let body = r#"{
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {}, "value": [1700000000.123, "42.5"]},
                    {"metric": {}, "value": [1700000000.123, "99.9"]}
                ]
            }
        }"#;
        assert_eq!(extract_value(body), Some(42.5));
    }

    #[test]
    fn extract_value_handles_empty_result() {
        let body = r#"{"status": "success", "data": {"resultType": "vector", "result": []}}"#;
        assert_eq!(extract_value(body), None);
    }

    #[test]
    fn extract_value_handles_error_status() {
        let body = r#"{"status": "error", "data": {"result": []}}"#;
        assert_eq!(extract_value(body), None);
    }

    #[test]
    fn extract_value_handles_malformed_body() {
        assert_eq!(extract_value("not json"), None);
        assert_eq!(extract_value(r#"{"status": "success"}"#), None);
    }

    #[test]
    fn stats_default_to_unknown() {
        let stats = SystemStats::default();
        assert!(stats.cpu.is_none());
        assert!(stats.uptime.is_none());
    }
}
