//! Monitor configuration
//!
//! File-based configuration with environment-variable overrides, validated
//! before any probe is wired up.


use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::utils::error::{MonitorError, Result};

/// Top-level monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between poll cycles
    pub poll_interval_secs: u64,
    /// Bound on a single probe check, in seconds
    pub probe_timeout_secs: u64,
    /// Broker status probe
    pub broker: BrokerConfig,
    /// Backend services probe
    pub backend: BackendConfig,
}

/// Broker status probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Entry name the broker check reports under
    pub name: String,
    /// Status endpoint URL
    pub url: String,
}

/// Backend services probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Entry name the summary check reports under
    pub name: String,
    /// Summary endpoint URL
    pub summary_url: String,
    /// Per-service detail endpoint URL
    pub detail_url: String,
    /// Namespace prefix stripped from sub-service type identifiers
    pub type_prefix: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            probe_timeout_secs: 10,
            broker: BrokerConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            name: "ActiveMQ".to_string(),
            url: "http://localhost:8080/broker/status".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            name: "Backend Services".to_string(),
            summary_url: "http://localhost:8080/services/health.json".to_string(),
            detail_url: "http://localhost:8080/services/services.json".to_string(),
            type_prefix: "opencastproject.".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a YAML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "loading configuration file");
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&raw)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = env::var("SERVMON_POLL_INTERVAL") {
            self.poll_interval_secs = value
                .parse()
                .map_err(|e| MonitorError::Config(format!("Invalid poll interval: {}", e)))?;
        }
        if let Ok(value) = env::var("SERVMON_PROBE_TIMEOUT") {
            self.probe_timeout_secs = value
                .parse()
                .map_err(|e| MonitorError::Config(format!("Invalid probe timeout: {}", e)))?;
        }
        if let Ok(value) = env::var("SERVMON_BROKER_URL") {
            self.broker.url = value;
        }
        if let Ok(value) = env::var("SERVMON_SUMMARY_URL") {
            self.backend.summary_url = value;
        }
        if let Ok(value) = env::var("SERVMON_DETAIL_URL") {
            self.backend.detail_url = value;
        }
        Ok(())
    }

    /// Check the configuration is usable before wiring probes
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(MonitorError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(MonitorError::Config(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        if self.broker.name.trim().is_empty() || self.backend.name.trim().is_empty() {
            return Err(MonitorError::Config(
                "probe names must not be empty".to_string(),
            ));
        }
        validate_endpoint(&self.broker.url, "broker.url")?;
        validate_endpoint(&self.backend.summary_url, "backend.summary_url")?;
        validate_endpoint(&self.backend.detail_url, "backend.detail_url")?;
        Ok(())
    }

    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Probe timeout as a [`Duration`]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

fn validate_endpoint(url_str: &str, context: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| MonitorError::Config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(MonitorError::Config(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(MonitorError::Config(format!(
            "{} URL must have a valid host",
            context
        )));
    }
    Ok(())
}
