//! Snapshot publication
//!
//! Fans freshly published snapshots out to registered subscribers. A
//! misbehaving subscriber never blocks the cycle or the other subscribers.


use parking_lot::RwLock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

use crate::core::snapshot::Snapshot;

/// Handle identifying a registered subscriber
pub type SubscriptionId = u64;

type Callback = Arc<dyn Fn(Arc<Snapshot>) + Send + Sync>;

/// Notifies subscribers when a new snapshot lands
#[derive(Default)]
pub struct Publisher {
    next_id: AtomicU64,
    subscribers: RwLock<Vec<(SubscriptionId, Callback)>>,
}

impl Publisher {
    /// Create a publisher with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; returns the handle needed to unsubscribe
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Arc<Snapshot>) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns whether the handle was known.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Notify every subscriber of a published snapshot.
    ///
    /// Callbacks run outside the subscriber lock, so a callback may
    /// subscribe or unsubscribe. A panicking callback is logged and the
    /// remaining subscribers still run.
    pub fn notify(&self, snapshot: &Arc<Snapshot>) {
        let subscribers: Vec<(SubscriptionId, Callback)> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in subscribers {
            let snap = Arc::clone(snapshot);
            if catch_unwind(AssertUnwindSafe(|| callback(snap))).is_err() {
                error!(subscriber = id, "snapshot subscriber panicked");
            }
        }
    }
}
