//! Poll cycle execution

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::core::probe::{Probe, ProbeError, ProbeOutcome, ProbeRegistry, ProbeResult};
use crate::core::publisher::{Publisher, SubscriptionId};
use crate::core::snapshot::{STATUS_MALFORMED, ServiceEntry, Snapshot, SnapshotStore};
use crate::utils::error::{MonitorError, Result};

/// Coordinates probe execution, merging, and snapshot publication.
///
/// Cycles are serialized: a `run_cycle` call that finds another cycle in
/// flight fails with [`MonitorError::Busy`] instead of piling up. Per-probe
/// failures never surface to the caller; they become error entries in the
/// snapshot.
pub struct Aggregator {
    registry: ProbeRegistry,
    store: SnapshotStore,
    publisher: Publisher,
    probe_timeout: Duration,
    cycle_running: AtomicBool,
}

impl Aggregator {
    /// Default bound on a single probe check
    pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create an aggregator with the default probe timeout
    pub fn new(registry: ProbeRegistry) -> Self {
        Self::with_timeout(registry, Self::DEFAULT_PROBE_TIMEOUT)
    }

    /// Create an aggregator with an explicit per-probe timeout
    pub fn with_timeout(registry: ProbeRegistry, probe_timeout: Duration) -> Self {
        Self {
            registry,
            store: SnapshotStore::new(),
            publisher: Publisher::new(),
            probe_timeout,
            cycle_running: AtomicBool::new(false),
        }
    }

    /// Latest published snapshot, or `None` before the first completed cycle
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.store.current()
    }

    /// Register a callback invoked after every published snapshot
    pub fn on_snapshot<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Arc<Snapshot>) + Send + Sync + 'static,
    {
        self.publisher.subscribe(callback)
    }

    /// Remove a snapshot subscriber
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Run one full poll cycle.
    ///
    /// All registered probes are launched concurrently, each bounded by the
    /// per-probe timeout. Their contributions are merged in registration
    /// order, the snapshot is sealed, swapped into the store, and handed to
    /// subscribers.
    pub async fn run_cycle(&self) -> Result<Arc<Snapshot>> {
        if self
            .cycle_running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(MonitorError::Busy);
        }
        let _guard = CycleGuard(&self.cycle_running);

        debug!(probes = self.registry.len(), "starting poll cycle");

        let checks = self
            .registry
            .probes()
            .iter()
            .map(|probe| self.run_probe(probe));
        let reports = join_all(checks).await;

        let mut entries: HashMap<String, ServiceEntry> = HashMap::new();
        for (probe, report) in self.registry.probes().iter().zip(reports) {
            merge_report(&mut entries, probe.name(), report);
        }

        let snapshot = Arc::new(Snapshot::finalize(entries));
        self.store.publish(Arc::clone(&snapshot));
        self.publisher.notify(&snapshot);

        debug!(
            entries = snapshot.entries.len(),
            errors = snapshot.error_count,
            "poll cycle complete"
        );
        Ok(snapshot)
    }

    async fn run_probe(
        &self,
        probe: &Arc<dyn Probe>,
    ) -> std::result::Result<ProbeOutcome, ProbeError> {
        debug!(probe = probe.name(), "dispatching probe");
        match tokio::time::timeout(self.probe_timeout, probe.check()).await {
            Ok(report) => report,
            Err(_) => Err(ProbeError::Transport("Request Timeout".to_string())),
        }
    }
}

/// Clears the run flag when the cycle ends, normally or by panic
struct CycleGuard<'a>(&'a AtomicBool);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Apply one probe's contribution to the entry map.
///
/// Key collisions are last-write-wins: a later probe, or a later sub-service
/// row, replaces an earlier entry with the same derived name wholesale.
fn merge_report(
    entries: &mut HashMap<String, ServiceEntry>,
    probe_name: &str,
    report: std::result::Result<ProbeOutcome, ProbeError>,
) {
    match report {
        Ok(ProbeOutcome::Single(result)) => insert_entry(entries, probe_name, result),
        Ok(ProbeOutcome::PerService(services)) => {
            for (name, result) in services {
                insert_entry(entries, &name, result);
            }
        }
        Err(ProbeError::Malformed) => {
            warn!(probe = probe_name, "probe returned malformed data");
            entries.insert(
                probe_name.to_string(),
                ServiceEntry::error(probe_name, STATUS_MALFORMED),
            );
        }
        Err(ProbeError::Transport(detail)) => {
            warn!(probe = probe_name, detail = detail.as_str(), "probe transport failure");
            entries.insert(
                probe_name.to_string(),
                ServiceEntry::error(probe_name, detail),
            );
        }
    }
}

fn insert_entry(entries: &mut HashMap<String, ServiceEntry>, name: &str, result: ProbeResult) {
    let entry = match result {
        ProbeResult::Healthy => ServiceEntry::ok(name),
        ProbeResult::Degraded { detail } | ProbeResult::Failed { detail } => {
            ServiceEntry::error(name, detail)
        }
    };
    entries.insert(name.to_string(), entry);
}
