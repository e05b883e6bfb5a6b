//! Single-slot snapshot store

use parking_lot::RwLock;
use std::sync::Arc;

use super::types::Snapshot;

/// Holds the latest completed snapshot.
///
/// `publish` replaces the slot with a single `Arc` swap under a short write
/// lock; readers clone the `Arc` out and never observe a half-built
/// snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    slot: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Replace the slot with a freshly completed snapshot
    pub fn publish(&self, snapshot: Arc<Snapshot>) {
        *self.slot.write() = Some(snapshot);
    }

    /// Latest snapshot, or `None` before the first completed cycle
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.slot.read().clone()
    }
}
