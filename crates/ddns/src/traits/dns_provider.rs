// # DNS Provider Trait
//
// Defines the interface for reading and mutating the published DNS record.
//
// ## Implementations
//
// - Porkbun: `homelab-porkbun` crate
//
// Providers are isolated, stateless, single-shot API adapters. They make
// one API call per method invocation and report success or failure; the
// reconciler owns retry pacing, state tracking, and the create-or-update
// decision.

use crate::config::RecordSpec;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the currently published content of the record
    ///
    /// # Returns
    ///
    /// - `Ok(Some(content))`: The record exists with this content
    /// - `Ok(None)`: No matching record was found
    /// - `Err(Error)`: The lookup itself failed
    async fn fetch_record(&self, record: &RecordSpec) -> Result<Option<String>, crate::Error>;

    /// Create the record with the given content
    ///
    /// Called only when no record exists remotely.
    async fn create_record(&self, record: &RecordSpec, content: &str) -> Result<(), crate::Error>;

    /// Update the existing record to the given content
    ///
    /// Called only when the remote content differs from the desired one.
    async fn update_record(&self, record: &RecordSpec, content: &str) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
