//! Background polling task

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, error};

use crate::utils::error::MonitorError;

use super::cycle::Aggregator;

/// Drives [`Aggregator::run_cycle`] on a fixed interval.
///
/// A tick that lands while the previous cycle is still in flight is skipped;
/// cycles never overlap and never queue up.
pub struct Scheduler {
    aggregator: Arc<Aggregator>,
    interval: Duration,
    active: Arc<AtomicBool>,
}

impl Scheduler {
    /// Create a scheduler polling at the given interval
    pub fn new(aggregator: Arc<Aggregator>, interval: Duration) -> Self {
        Self {
            aggregator,
            interval,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the polling task is running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Spawn the polling loop. The first cycle runs immediately.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        self.active.store(true, Ordering::Release);

        let aggregator = Arc::clone(&self.aggregator);
        let active = Arc::clone(&self.active);
        let period = self.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                if !active.load(Ordering::Acquire) {
                    break;
                }

                match aggregator.run_cycle().await {
                    Ok(_) => {}
                    Err(MonitorError::Busy) => {
                        debug!("previous cycle still running, skipping tick");
                    }
                    Err(e) => error!("poll cycle failed: {}", e),
                }
            }
        })
    }

    /// Stop the polling loop after its current tick
    pub fn stop(&self) {
        self.active.store(false, Ordering::Release);
    }
}
