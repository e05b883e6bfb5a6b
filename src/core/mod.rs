//! Core aggregation engine

pub mod aggregator;
pub mod probe;
pub mod publisher;
pub mod snapshot;
