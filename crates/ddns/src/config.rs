//! Configuration types for the DDNS reconciler
//!
//! All configuration is read once at startup and passed in as immutable
//! values; nothing here is ambient global state.

use serde::{Deserialize, Serialize};

/// The DNS record the reconciler converges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Registered domain (e.g., "example.com")
    pub domain: String,

    /// Subdomain label, with "@" denoting the apex
    #[serde(default = "default_subdomain")]
    pub subdomain: String,

    /// Record time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u32,
}

impl RecordSpec {
    /// Create a spec for the apex record of a domain
    pub fn apex(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: default_subdomain(),
            ttl_secs: default_ttl_secs(),
        }
    }

    /// Create a spec for a subdomain record
    pub fn subdomain(domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.into(),
            ttl_secs: default_ttl_secs(),
        }
    }

    /// Whether this spec targets the domain apex
    pub fn is_apex(&self) -> bool {
        self.subdomain == "@"
    }

    /// Fully qualified record name ("example.com" or "sub.example.com")
    pub fn record_name(&self) -> String {
        if self.is_apex() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }

    /// Validate the record spec
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain.is_empty() {
            return Err(crate::Error::config("record domain cannot be empty"));
        }
        if self.subdomain.is_empty() {
            return Err(crate::Error::config(
                "record subdomain cannot be empty (use \"@\" for the apex)",
            ));
        }
        if self.ttl_secs == 0 {
            return Err(crate::Error::config("record TTL must be > 0"));
        }
        Ok(())
    }
}

/// Reconciler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// The record to keep in sync
    pub record: RecordSpec,

    /// Main poll interval between reconciliation cycles (seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Short back-off used when the public IP cannot be determined (seconds)
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,

    /// Capacity of the reconciler event channel
    ///
    /// When full, new events are dropped with a warning log.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl DdnsConfig {
    /// Create a configuration with default pacing for a record
    pub fn new(record: RecordSpec) -> Self {
        Self {
            record,
            interval_secs: default_interval_secs(),
            backoff_secs: default_backoff_secs(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.record.validate()?;

        if self.interval_secs == 0 {
            return Err(crate::Error::config("poll interval must be > 0"));
        }
        if self.backoff_secs == 0 {
            return Err(crate::Error::config("lookup back-off must be > 0"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event channel capacity must be > 0"));
        }

        Ok(())
    }
}

fn default_subdomain() -> String {
    "@".to_string()
}

fn default_ttl_secs() -> u32 {
    300
}

fn default_interval_secs() -> u64 {
    300
}

fn default_backoff_secs() -> u64 {
    60
}

fn default_event_channel_capacity() -> usize {
    1000
}
