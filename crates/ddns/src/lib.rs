// # homelab-ddns
//
// Core library for the homelab DDNS reconciler.
//
// ## Architecture Overview
//
// - **IpLookup**: Trait for discovering the current public IP
// - **DnsProvider**: Trait for reading and mutating the published record
// - **Clock**: Trait for the loop's sleep source (injectable for tests)
// - **Reconciler**: Control loop that compares desired state (current IP)
//   to actual state (published record) and issues corrective actions
// - **SessionState**: The single in-memory `last published IP` value
//
// ## Design Principles
//
// 1. Configuration is read once and passed in, never ambient
// 2. Providers and lookups are stateless adapters; the reconciler owns
//    all pacing and decisions
// 3. Nothing is persisted: a restart re-checks the remote record, which
//    is a harmless no-op when it is already in sync

pub mod config;
pub mod error;
pub mod reconciler;
pub mod session;
pub mod traits;

// Re-export core types for convenience
pub use config::{DdnsConfig, RecordSpec};
pub use error::{Error, Result};
pub use reconciler::{classify, Reconciler, ReconcilerEvent, RecordState, TickOutcome};
pub use session::SessionState;
pub use traits::{Clock, DnsProvider, IpLookup, TokioClock};
