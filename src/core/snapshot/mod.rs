//! Health snapshots
//!
//! This module holds the snapshot data model and the single-slot store that
//! hands the latest completed snapshot to readers.

mod store;
mod types;


pub use store::SnapshotStore;
pub use types::{STATUS_MALFORMED, STATUS_OK, ServiceEntry, Snapshot};
