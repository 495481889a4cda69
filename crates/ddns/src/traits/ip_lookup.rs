// # IP Lookup Trait
//
// Defines the interface for discovering the host's current public IP.
//
// ## Implementations
//
// - HTTP fallback list: `homelab-ip-lookup` crate
//
// IP values are carried as trimmed strings. Beyond whitespace trimming no
// format validation is performed; the published record simply mirrors
// whatever the lookup endpoint reported.

use async_trait::async_trait;

/// Trait for public IP discovery implementations
///
/// Implementations must be thread-safe and usable across async tasks.
/// They are observers only: no retry pacing, no DNS calls, no decisions
/// about when to update. The reconciler owns all of that.
#[async_trait]
pub trait IpLookup: Send + Sync {
    /// Discover the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The current IP, trimmed of surrounding whitespace
    /// - `Err(Error::NoIpAvailable)`: If no source could produce an IP
    async fn current_ip(&self) -> Result<String, crate::Error>;
}
