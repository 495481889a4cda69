//! Test doubles and common utilities for reconciler contract tests
//!
//! The doubles are Clone over shared Arc internals so a test can hand one
//! clone to the reconciler and keep another for assertions.

#![allow(dead_code)]

use async_trait::async_trait;
use homelab_ddns::config::RecordSpec;
use homelab_ddns::error::{Error, Result};
use homelab_ddns::traits::{Clock, DnsProvider, IpLookup};
use homelab_ddns::{DdnsConfig, Reconciler, ReconcilerEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// One scripted IP discovery result
#[derive(Debug, Clone)]
pub enum LookupStep {
    /// Discovery succeeds with this IP
    Ip(&'static str),
    /// Discovery fails (all endpoints down)
    Unavailable,
}

/// An IpLookup that replays a scripted sequence of results
///
/// When the script is exhausted the last step repeats, so a test can run
/// more ticks than it scripted without surprises.
#[derive(Clone)]
pub struct ScriptedIpLookup {
    script: Arc<Vec<LookupStep>>,
    cursor: Arc<AtomicUsize>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedIpLookup {
    pub fn new(script: Vec<LookupStep>) -> Self {
        assert!(!script.is_empty(), "script must have at least one step");
        Self {
            script: Arc::new(script),
            cursor: Arc::new(AtomicUsize::new(0)),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Lookup that always returns the same IP
    pub fn fixed(ip: &'static str) -> Self {
        Self::new(vec![LookupStep::Ip(ip)])
    }

    /// Lookup that always fails
    pub fn unavailable() -> Self {
        Self::new(vec![LookupStep::Unavailable])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpLookup for ScriptedIpLookup {
    async fn current_ip(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let step = self
            .script
            .get(index)
            .unwrap_or_else(|| self.script.last().unwrap());
        match step {
            LookupStep::Ip(ip) => Ok(ip.to_string()),
            LookupStep::Unavailable => Err(Error::NoIpAvailable),
        }
    }
}

/// A DnsProvider double that tracks calls and simulates remote state
#[derive(Clone)]
pub struct MockDnsProvider {
    remote: Arc<Mutex<Option<String>>>,
    fetch_count: Arc<AtomicUsize>,
    create_count: Arc<AtomicUsize>,
    update_count: Arc<AtomicUsize>,
    created_contents: Arc<Mutex<Vec<String>>>,
    updated_contents: Arc<Mutex<Vec<String>>>,
    fail_mutations: Arc<Mutex<bool>>,
    fail_fetch: Arc<Mutex<bool>>,
}

impl MockDnsProvider {
    /// Provider with no existing remote record
    pub fn empty() -> Self {
        Self::with_remote(None)
    }

    /// Provider with an existing remote record
    pub fn with_record(content: &str) -> Self {
        Self::with_remote(Some(content.to_string()))
    }

    fn with_remote(remote: Option<String>) -> Self {
        Self {
            remote: Arc::new(Mutex::new(remote)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            create_count: Arc::new(AtomicUsize::new(0)),
            update_count: Arc::new(AtomicUsize::new(0)),
            created_contents: Arc::new(Mutex::new(Vec::new())),
            updated_contents: Arc::new(Mutex::new(Vec::new())),
            fail_mutations: Arc::new(Mutex::new(false)),
            fail_fetch: Arc::new(Mutex::new(false)),
        }
    }

    /// Make subsequent create/update calls fail
    pub fn set_fail_mutations(&self, fail: bool) {
        *self.fail_mutations.lock().unwrap() = fail;
    }

    /// Make subsequent fetch calls fail
    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn mutation_count(&self) -> usize {
        self.create_count() + self.update_count()
    }

    pub fn created_contents(&self) -> Vec<String> {
        self.created_contents.lock().unwrap().clone()
    }

    pub fn updated_contents(&self) -> Vec<String> {
        self.updated_contents.lock().unwrap().clone()
    }

    pub fn remote_content(&self) -> Option<String> {
        self.remote.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn fetch_record(&self, _record: &RecordSpec) -> Result<Option<String>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if *self.fail_fetch.lock().unwrap() {
            return Err(Error::provider("mock", "retrieve failed"));
        }
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn create_record(&self, _record: &RecordSpec, content: &str) -> Result<()> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        if *self.fail_mutations.lock().unwrap() {
            return Err(Error::provider("mock", "create failed"));
        }
        self.created_contents
            .lock()
            .unwrap()
            .push(content.to_string());
        *self.remote.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    async fn update_record(&self, _record: &RecordSpec, content: &str) -> Result<()> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        if *self.fail_mutations.lock().unwrap() {
            return Err(Error::provider("mock", "edit failed"));
        }
        self.updated_contents
            .lock()
            .unwrap()
            .push(content.to_string());
        *self.remote.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A clock that records requested sleeps and returns immediately
#[derive(Clone, Default)]
pub struct ManualClock {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Default test configuration: example.com apex, 300s interval, 60s back-off
pub fn test_config() -> DdnsConfig {
    DdnsConfig::new(RecordSpec::apex("example.com"))
}

/// Wire a reconciler from test doubles
pub fn build_reconciler(
    lookup: &ScriptedIpLookup,
    provider: &MockDnsProvider,
    clock: &ManualClock,
    config: DdnsConfig,
) -> (Reconciler, mpsc::Receiver<ReconcilerEvent>) {
    Reconciler::new(
        Box::new(lookup.clone()),
        Box::new(provider.clone()),
        Box::new(clock.clone()),
        config,
    )
    .expect("reconciler construction succeeds")
}

/// Drain all currently buffered events from the receiver
pub fn drain_events(rx: &mut mpsc::Receiver<ReconcilerEvent>) -> Vec<ReconcilerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
