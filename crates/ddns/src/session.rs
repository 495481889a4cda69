// # Session State
//
// In-memory record of the last IP the reconciler successfully published.
//
// ## Crash Behavior
//
// Nothing is persisted. After a restart the first cycle treats the IP as
// unknown and re-checks the remote record, which is harmless: an
// up-to-date record produces no mutation call.

use chrono::{DateTime, Utc};

/// Last successfully published IP, held in memory only
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    last_ip: Option<String>,
    last_synced: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Create an empty session (IP unknown)
    pub fn new() -> Self {
        Self::default()
    }

    /// The last IP successfully published, if any
    pub fn last_ip(&self) -> Option<&str> {
        self.last_ip.as_deref()
    }

    /// When the record was last confirmed in sync, if ever
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    /// Whether the given IP matches the last published one
    pub fn is_current(&self, ip: &str) -> bool {
        self.last_ip.as_deref() == Some(ip)
    }

    /// Record a successful sync at the given IP
    pub fn mark_synced(&mut self, ip: &str) {
        self.last_ip = Some(ip.to_string());
        self.last_synced = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let session = SessionState::new();
        assert_eq!(session.last_ip(), None);
        assert!(session.last_synced().is_none());
        assert!(!session.is_current("1.2.3.4"));
    }

    #[test]
    fn mark_synced_updates_ip_and_timestamp() {
        let mut session = SessionState::new();
        session.mark_synced("1.2.3.4");

        assert_eq!(session.last_ip(), Some("1.2.3.4"));
        assert!(session.last_synced().is_some());
        assert!(session.is_current("1.2.3.4"));
        assert!(!session.is_current("5.6.7.8"));
    }
}
