//! Snapshot data model
//!
//! A snapshot is the merged result of one completed poll cycle. It is built
//! fresh each cycle and never mutated after publication.

use serde::Serialize;
use std::collections::HashMap;

/// Status string recorded for a healthy entry
pub const STATUS_OK: &str = "OK";

/// Status string recorded when a response was missing expected fields
pub const STATUS_MALFORMED: &str = "Malformed Data";

/// One row per distinct logical service discovered during a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    /// Derived service name, unique within a snapshot
    pub name: String,
    /// Short human-readable status
    pub status: String,
    /// Whether this entry counts toward the snapshot error count
    pub is_error: bool,
}

impl ServiceEntry {
    /// Entry for a service that answered and is fully operational
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: STATUS_OK.to_string(),
            is_error: false,
        }
    }

    /// Entry for a service reporting the given failure status
    pub fn error(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            is_error: true,
        }
    }
}

/// The merged, immutable result of one completed poll cycle
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Entries keyed by derived service name
    pub entries: HashMap<String, ServiceEntry>,
    /// Whether any entry is an error
    pub has_error: bool,
    /// Number of entries with `is_error` set
    pub error_count: usize,
    /// When the cycle completed
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl Snapshot {
    /// Seal a merged entry map into a snapshot.
    ///
    /// Invariants: `error_count` equals the number of error entries and
    /// `has_error` holds exactly when `error_count > 0`.
    pub fn finalize(entries: HashMap<String, ServiceEntry>) -> Self {
        let error_count = entries.values().filter(|e| e.is_error).count();
        Self {
            has_error: error_count > 0,
            error_count,
            entries,
            completed_at: chrono::Utc::now(),
        }
    }

    /// Look up an entry by derived service name
    pub fn get(&self, name: &str) -> Option<&ServiceEntry> {
        self.entries.get(name)
    }
}
