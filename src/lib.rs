//! # servmon-rs
//!
//! A backend service-health aggregation poller. A bounded set of named
//! probes is checked concurrently each cycle; their results are merged into
//! one immutable snapshot, atomically swapped into a single-slot store, and
//! fanned out to subscribers. Readers never block on probes and never see a
//! half-built snapshot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use servmon_rs::core::aggregator::Aggregator;
//! use servmon_rs::core::probe::ProbeRegistry;
//! use servmon_rs::core::probe::http::BrokerProbe;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = reqwest::Client::new();
//!
//!     let mut registry = ProbeRegistry::new();
//!     registry.register(Arc::new(BrokerProbe::new(
//!         "ActiveMQ",
//!         "http://localhost:8080/broker/status",
//!         client,
//!     )))?;
//!
//!     let aggregator = Aggregator::new(registry);
//!     aggregator.on_snapshot(|snapshot| {
//!         println!("{} services, {} errors", snapshot.entries.len(), snapshot.error_count);
//!     });
//!
//!     let snapshot = aggregator.run_cycle().await?;
//!     assert!(aggregator.current().is_some());
//!     println!("has_error: {}", snapshot.has_error);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod navigation;
pub mod utils;

// Re-export main types
pub use config::MonitorConfig;
pub use core::aggregator::{Aggregator, Scheduler};
pub use core::probe::{Probe, ProbeError, ProbeOutcome, ProbeRegistry, ProbeResult};
pub use core::publisher::{Publisher, SubscriptionId};
pub use core::snapshot::{ServiceEntry, Snapshot, SnapshotStore};
pub use utils::error::{MonitorError, Result};
