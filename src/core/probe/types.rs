//! Probe contract and check results

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict of a single check against one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeResult {
    /// Dependency answered and is fully operational
    Healthy,
    /// Dependency answered but reported a degraded condition
    Degraded {
        /// Short human-readable status
        detail: String,
    },
    /// Dependency answered with a failure state
    Failed {
        /// Short human-readable status
        detail: String,
    },
}

/// What one probe contributes to the snapshot in one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// One entry, recorded under the probe's own name
    Single(ProbeResult),
    /// Entries for sub-services discovered by the probe.
    ///
    /// May be empty: sub-services in their nominal state are omitted
    /// entirely, not reported as healthy entries.
    PerService(Vec<(String, ProbeResult)>),
}

/// Failures a probe reports instead of an outcome
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The call itself failed; the detail is a short status text
    #[error("{0}")]
    Transport(String),
    /// The response arrived but expected fields were absent
    #[error("Malformed Data")]
    Malformed,
}

/// A single named check against one backend dependency
#[async_trait]
pub trait Probe: Send + Sync {
    /// Unique name within a registry
    fn name(&self) -> &str;

    /// Run the check once
    async fn check(&self) -> Result<ProbeOutcome, ProbeError>;
}
