//! Core reconciliation loop
//!
//! The Reconciler is responsible for:
//! - Discovering the current public IP via [`IpLookup`]
//! - Comparing it to the session's last published IP
//! - Converging the remote record via [`DnsProvider`]
//! - Emitting events for external observability
//!
//! ## Cycle
//!
//! 1. Discover the current IP. On failure, wait the short back-off and
//!    retry without consuming the main interval.
//! 2. If the IP matches the last published one, skip all remote calls.
//! 3. Otherwise fetch the remote record and apply the create-or-update
//!    decision.
//! 4. Sleep the configured interval, then repeat.
//!
//! The loop sleeps through the injectable [`Clock`] so tests can drive a
//! bounded number of cycles with a manual clock ([`Reconciler::run_ticks`])
//! instead of running forever.

use crate::config::{DdnsConfig, RecordSpec};
use crate::error::Result;
use crate::session::SessionState;
use crate::traits::{Clock, DnsProvider, IpLookup};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Remote record state observed during one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordState {
    /// No record exists remotely
    NoRecord,
    /// A record exists but its content differs from the current IP
    StaleRecord {
        /// The content currently published
        remote: String,
    },
    /// The record already matches the current IP
    UpToDate,
}

/// Classify the remote record against the current IP
///
/// A lookup that produced nothing is indistinguishable from an absent
/// record here, so a transient provider outage can surface as `NoRecord`
/// and trigger a create attempt against an existing record.
pub fn classify(remote: Option<&str>, current: &str) -> RecordState {
    match remote {
        None => RecordState::NoRecord,
        Some(content) if content != current => RecordState::StaleRecord {
            remote: content.to_string(),
        },
        Some(_) => RecordState::UpToDate,
    }
}

/// Outcome of a single reconciliation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The public IP could not be determined; the loop backs off
    NoIp,
    /// The IP matched the session state; no remote calls were made
    Unchanged,
    /// The remote record was brought (or confirmed) in sync
    Reconciled,
    /// A create or update call failed; the transition is retried next cycle
    Failed,
}

/// Events emitted by the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilerEvent {
    /// A different public IP was discovered
    IpChanged {
        previous: Option<String>,
        current: String,
    },

    /// The record did not exist and was created
    RecordCreated { record_name: String, ip: String },

    /// The record existed with stale content and was updated
    RecordUpdated {
        record_name: String,
        previous: String,
        ip: String,
    },

    /// The record already matched the discovered IP
    InSync { record_name: String, ip: String },

    /// A create or update call failed
    SyncFailed {
        record_name: String,
        ip: String,
        error: String,
    },

    /// Every IP lookup endpoint failed
    IpLookupFailed,
}

/// Core reconciler
///
/// Drives the IP discovery → record convergence flow on a fixed interval.
/// All state lives in the single in-process [`SessionState`]; nothing is
/// shared across tasks and nothing is persisted.
pub struct Reconciler {
    /// Public IP discovery
    lookup: Box<dyn IpLookup>,

    /// DNS provider for record reads and mutations
    provider: Box<dyn DnsProvider>,

    /// Sleep source (injectable for tests)
    clock: Box<dyn Clock>,

    /// The record to converge
    record: RecordSpec,

    /// Main poll interval
    interval: Duration,

    /// Short back-off used when IP discovery fails
    backoff: Duration,

    /// Last successfully published IP
    session: SessionState,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<ReconcilerEvent>,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Returns
    ///
    /// A tuple of (reconciler, event_receiver) where the receiver yields
    /// reconciler events.
    pub fn new(
        lookup: Box<dyn IpLookup>,
        provider: Box<dyn DnsProvider>,
        clock: Box<dyn Clock>,
        config: DdnsConfig,
    ) -> Result<(Self, mpsc::Receiver<ReconcilerEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let reconciler = Self {
            lookup,
            provider,
            clock,
            record: config.record,
            interval: Duration::from_secs(config.interval_secs),
            backoff: Duration::from_secs(config.backoff_secs),
            session: SessionState::new(),
            event_tx: tx,
        };

        Ok((reconciler, rx))
    }

    /// The session state (last published IP)
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run the reconciliation loop forever
    ///
    /// Termination is by process exit; abrupt termination between cycles
    /// is acceptable since no state is persisted.
    pub async fn run(&mut self) {
        info!(
            "reconciler started for {} via {} (interval: {}s)",
            self.record.record_name(),
            self.provider.provider_name(),
            self.interval.as_secs()
        );

        loop {
            let outcome = self.tick().await;
            self.pause(outcome).await;
        }
    }

    /// Run a bounded number of cycles, sleeping between them
    ///
    /// Test entry point: with a manual clock the sleeps return
    /// immediately, so a scripted sequence of IPs can be replayed
    /// deterministically.
    pub async fn run_ticks(&mut self, ticks: usize) -> Vec<TickOutcome> {
        let mut outcomes = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            let outcome = self.tick().await;
            self.pause(outcome).await;
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Execute one reconciliation cycle without sleeping
    pub async fn tick(&mut self) -> TickOutcome {
        let current = match self.lookup.current_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!("could not determine public IP, retrying: {}", e);
                self.emit_event(ReconcilerEvent::IpLookupFailed);
                return TickOutcome::NoIp;
            }
        };

        if self.session.is_current(&current) {
            debug!("public IP unchanged ({}), skipping remote calls", current);
            return TickOutcome::Unchanged;
        }

        info!(
            "IP change detected: {} -> {}",
            self.session.last_ip().unwrap_or("unknown"),
            current
        );
        self.emit_event(ReconcilerEvent::IpChanged {
            previous: self.session.last_ip().map(String::from),
            current: current.clone(),
        });

        match self.converge(&current).await {
            Ok(()) => TickOutcome::Reconciled,
            Err(e) => {
                error!(
                    "failed to sync {}: {}",
                    self.record.record_name(),
                    e
                );
                self.emit_event(ReconcilerEvent::SyncFailed {
                    record_name: self.record.record_name(),
                    ip: current,
                    error: e.to_string(),
                });
                TickOutcome::Failed
            }
        }
    }

    /// Bring the remote record in line with the current IP
    ///
    /// On any create/update failure the session is left untouched so the
    /// same transition is retried next cycle.
    async fn converge(&mut self, current: &str) -> Result<()> {
        let record_name = self.record.record_name();

        let remote = match self.provider.fetch_record(&self.record).await {
            Ok(remote) => remote,
            Err(e) => {
                // Lookup failure and absence both fold into NoRecord.
                warn!("error getting current record for {}: {}", record_name, e);
                None
            }
        };

        match classify(remote.as_deref(), current) {
            RecordState::NoRecord => {
                info!("creating new A record for {} -> {}", record_name, current);
                self.provider.create_record(&self.record, current).await?;
                info!("successfully created DNS record");
                self.session.mark_synced(current);
                self.emit_event(ReconcilerEvent::RecordCreated {
                    record_name,
                    ip: current.to_string(),
                });
            }
            RecordState::StaleRecord { remote } => {
                info!(
                    "updating A record for {}: {} -> {}",
                    record_name, remote, current
                );
                self.provider.update_record(&self.record, current).await?;
                info!("successfully updated DNS record");
                self.session.mark_synced(current);
                self.emit_event(ReconcilerEvent::RecordUpdated {
                    record_name,
                    previous: remote,
                    ip: current.to_string(),
                });
            }
            RecordState::UpToDate => {
                info!("DNS record already up to date: {}", current);
                self.session.mark_synced(current);
                self.emit_event(ReconcilerEvent::InSync {
                    record_name,
                    ip: current.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Sleep until the next cycle
    ///
    /// A failed IP discovery waits the short back-off instead of the main
    /// interval so the loop recovers quickly from transient outages.
    async fn pause(&self, outcome: TickOutcome) {
        let wait = match outcome {
            TickOutcome::NoIp => self.backoff,
            _ => self.interval,
        };
        self.clock.sleep(wait).await;
    }

    /// Emit a reconciler event
    fn emit_event(&self, event: ReconcilerEvent) {
        if self.event_tx.try_send(event).is_err() {
            warn!("event channel full, dropping event");
        }
    }
}
