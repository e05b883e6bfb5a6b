//! Probe registry

use std::sync::Arc;

use crate::utils::error::{MonitorError, Result};

use super::types::Probe;

/// Ordered, duplicate-free set of probes run each cycle.
///
/// Registration order is preserved; it is also the order entries are merged
/// in, which is what makes name collisions deterministic.
#[derive(Default)]
pub struct ProbeRegistry {
    probes: Vec<Arc<dyn Probe>>,
}

impl ProbeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// Register a probe.
    ///
    /// Fails with [`MonitorError::DuplicateProbe`] if a probe with the same
    /// name is already registered.
    pub fn register(&mut self, probe: Arc<dyn Probe>) -> Result<()> {
        if self.probes.iter().any(|p| p.name() == probe.name()) {
            return Err(MonitorError::DuplicateProbe(probe.name().to_string()));
        }
        self.probes.push(probe);
        Ok(())
    }

    /// Probes in registration order
    pub fn probes(&self) -> &[Arc<dyn Probe>] {
        &self.probes
    }

    /// Number of registered probes
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}
