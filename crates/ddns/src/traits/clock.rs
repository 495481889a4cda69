// # Clock Trait
//
// The reconciler never calls `tokio::time::sleep` directly; it sleeps
// through this trait so tests can drive a bounded number of cycles with a
// manual clock instead of waiting out real intervals.

use async_trait::async_trait;
use std::time::Duration;

/// Trait for the reconciler's sleep source
#[async_trait]
pub trait Clock: Send + Sync {
    /// Sleep for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
