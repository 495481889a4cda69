//! Core traits for the DDNS reconciler
//!
//! This module defines the abstract interfaces the reconciler is wired
//! against.
//!
//! - [`IpLookup`]: Discover the current public IP address
//! - [`DnsProvider`]: Read and mutate the published DNS record
//! - [`Clock`]: Sleep between cycles (injectable for tests)

pub mod clock;
pub mod dns_provider;
pub mod ip_lookup;

pub use clock::{Clock, TokioClock};
pub use dns_provider::DnsProvider;
pub use ip_lookup::IpLookup;
