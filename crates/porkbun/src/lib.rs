// # Porkbun DNS Provider
//
// This crate provides the Porkbun DNS provider for the homelab DDNS
// reconciler.
//
// ## API Reference
//
// Porkbun API v3 (JSON over POST, credentials in the request body):
//
// - Retrieve record: POST `/dns/retrieveByNameType/{domain}/A/{subdomain}`
// - Edit record:     POST `/dns/editByNameType/{domain}/A/{subdomain}`
// - Create record:   POST `/dns/create/{domain}`
//
// Every response carries a `status` field (`SUCCESS` or an error status
// with a `message`); retrieval additionally carries a `records` list with
// `content` fields.
//
// ## Constraints
//
// The provider is a stateless single-shot adapter: one API call per
// method, no retry logic, no caching. The reconciler owns pacing and the
// create-or-update decision.
//
// API credentials never appear in logs or `Debug` output.

use async_trait::async_trait;
use homelab_ddns::config::RecordSpec;
use homelab_ddns::{DnsProvider, Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Porkbun API base URL
const PORKBUN_API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Status value Porkbun returns on success
const STATUS_SUCCESS: &str = "SUCCESS";

/// Response envelope shared by all Porkbun DNS endpoints
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    records: Vec<RecordEntry>,
}

impl ApiResponse {
    fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Content of the first returned record, if any
    fn first_content(&self) -> Option<String> {
        self.records.first().map(|r| r.content.clone())
    }

    fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// One record object from a retrieve response
#[derive(Debug, Deserialize)]
struct RecordEntry {
    content: String,
}

/// Porkbun DNS provider
pub struct PorkbunProvider {
    /// Porkbun API key. Never logged.
    api_key: String,

    /// Porkbun secret API key. Never logged.
    secret_key: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// The Debug implementation intentionally does not expose the key pair.
impl std::fmt::Debug for PorkbunProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunProvider")
            .field("api_key", &"<REDACTED>")
            .field("secret_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PorkbunProvider {
    /// Create a new Porkbun provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Porkbun API key
    /// - `secret_key`: Porkbun secret API key
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, secret_key, PORKBUN_API_BASE)
    }

    /// Create a provider against a custom API base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(Error::config("Porkbun API key cannot be empty"));
        }
        if secret_key.is_empty() {
            return Err(Error::config("Porkbun secret API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            secret_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn retrieve_url(&self, record: &RecordSpec) -> String {
        format!(
            "{}/dns/retrieveByNameType/{}/A/{}",
            self.base_url, record.domain, record.subdomain
        )
    }

    fn edit_url(&self, record: &RecordSpec) -> String {
        format!(
            "{}/dns/editByNameType/{}/A/{}",
            self.base_url, record.domain, record.subdomain
        )
    }

    fn create_url(&self, record: &RecordSpec) -> String {
        format!("{}/dns/create/{}", self.base_url, record.domain)
    }

    /// Credentials-only payload (retrieve)
    fn auth_payload(&self) -> Value {
        json!({
            "apikey": self.api_key,
            "secretapikey": self.secret_key,
        })
    }

    /// Payload for an edit call. TTL is sent as a string (API quirk).
    fn edit_payload(&self, record: &RecordSpec, content: &str) -> Value {
        json!({
            "apikey": self.api_key,
            "secretapikey": self.secret_key,
            "content": content,
            "ttl": record.ttl_secs.to_string(),
        })
    }

    /// Payload for a create call. The apex is addressed with an empty name.
    fn create_payload(&self, record: &RecordSpec, content: &str) -> Value {
        json!({
            "apikey": self.api_key,
            "secretapikey": self.secret_key,
            "type": "A",
            "name": if record.is_apex() { "" } else { record.subdomain.as_str() },
            "content": content,
            "ttl": record.ttl_secs.to_string(),
        })
    }

    /// POST a payload and parse the response envelope
    async fn post(&self, url: &str, payload: &Value) -> Result<ApiResponse> {
        debug!("porkbun request: {}", url);

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::provider("porkbun", format!("HTTP request failed: {}", e)))?;

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| Error::provider("porkbun", format!("failed to parse response: {}", e)))
    }
}

#[async_trait]
impl DnsProvider for PorkbunProvider {
    async fn fetch_record(&self, record: &RecordSpec) -> Result<Option<String>> {
        let response = self
            .post(&self.retrieve_url(record), &self.auth_payload())
            .await?;

        if !response.is_success() {
            return Err(Error::provider("porkbun", response.error_message()));
        }

        Ok(response.first_content())
    }

    async fn create_record(&self, record: &RecordSpec, content: &str) -> Result<()> {
        let payload = self.create_payload(record, content);
        let response = self.post(&self.create_url(record), &payload).await?;

        if !response.is_success() {
            return Err(Error::provider("porkbun", response.error_message()));
        }

        Ok(())
    }

    async fn update_record(&self, record: &RecordSpec, content: &str) -> Result<()> {
        let payload = self.edit_payload(record, content);
        let response = self.post(&self.edit_url(record), &payload).await?;

        if !response.is_success() {
            return Err(Error::provider("porkbun", response.error_message()));
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "porkbun"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> PorkbunProvider {
        PorkbunProvider::new("pk1_key", "sk1_secret").unwrap()
    }

    #[test]
    fn empty_credentials_rejected() {
        assert!(PorkbunProvider::new("", "secret").is_err());
        assert!(PorkbunProvider::new("key", "").is_err());
    }

    #[test]
    fn credentials_not_exposed_in_debug() {
        let debug_str = format!("{:?}", provider());
        assert!(!debug_str.contains("pk1_key"));
        assert!(!debug_str.contains("sk1_secret"));
        assert!(debug_str.contains("PorkbunProvider"));
    }

    #[test]
    fn endpoint_urls() {
        let p = provider();
        let apex = RecordSpec::apex("example.com");
        let sub = RecordSpec::subdomain("example.com", "home");

        assert_eq!(
            p.retrieve_url(&apex),
            "https://api.porkbun.com/api/json/v3/dns/retrieveByNameType/example.com/A/@"
        );
        assert_eq!(
            p.edit_url(&sub),
            "https://api.porkbun.com/api/json/v3/dns/editByNameType/example.com/A/home"
        );
        assert_eq!(
            p.create_url(&apex),
            "https://api.porkbun.com/api/json/v3/dns/create/example.com"
        );
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let p =
            PorkbunProvider::with_base_url("key", "secret", "http://127.0.0.1:8080/").unwrap();
        let apex = RecordSpec::apex("example.com");
        assert_eq!(
            p.create_url(&apex),
            "http://127.0.0.1:8080/dns/create/example.com"
        );
    }

    #[test]
    fn create_payload_uses_empty_name_for_apex() {
        let p = provider();
        let payload = p.create_payload(&RecordSpec::apex("example.com"), "1.2.3.4");

        assert_eq!(payload["name"], "");
        assert_eq!(payload["type"], "A");
        assert_eq!(payload["content"], "1.2.3.4");
        assert_eq!(payload["ttl"], "300");
    }

    #[test]
    fn create_payload_uses_subdomain_label() {
        let p = provider();
        let payload = p.create_payload(&RecordSpec::subdomain("example.com", "home"), "1.2.3.4");
        assert_eq!(payload["name"], "home");
    }

    #[test]
    fn edit_payload_sends_ttl_as_string() {
        let p = provider();
        let mut record = RecordSpec::apex("example.com");
        record.ttl_secs = 600;

        let payload = p.edit_payload(&record, "5.6.7.8");
        assert_eq!(payload["ttl"], "600");
        assert_eq!(payload["content"], "5.6.7.8");
        assert!(payload.get("type").is_none());
    }

    #[test]
    fn parse_retrieve_response_with_records() {
        let body = r#"{
            "status": "SUCCESS",
            "records": [
                {"id": "1", "name": "example.com", "type": "A", "content": "1.2.3.4", "ttl": "300"},
                {"id": "2", "name": "example.com", "type": "A", "content": "5.6.7.8", "ttl": "300"}
            ]
        }"#;

        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.first_content(), Some("1.2.3.4".to_string()));
    }

    #[test]
    fn parse_retrieve_response_without_records() {
        let body = r#"{"status": "SUCCESS", "records": []}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.first_content(), None);
    }

    #[test]
    fn parse_error_response() {
        let body = r#"{"status": "ERROR", "message": "Invalid API key."}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.error_message(), "Invalid API key.");
    }

    #[test]
    fn parse_mutation_response_without_message() {
        let body = r#"{"status": "SUCCESS"}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.error_message(), "unknown error");
    }
}
