//! Built-in HTTP probes
//!
//! Concrete probes over the monitored backend's REST status endpoints: a
//! single-status broker check and a two-stage backend-services check
//! (summary endpoint, then the per-service detail endpoint when the summary
//! reports abnormal services).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::types::{Probe, ProbeError, ProbeOutcome, ProbeResult};

/// State a sub-service reports when nothing is wrong
const NOMINAL_STATE: &str = "NORMAL";

/// Short human-readable detail for an HTTP response status
fn status_detail(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Short human-readable detail for a client-side transport failure
fn transport_detail(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request Timeout".to_string()
    } else if err.is_connect() {
        "Connection Failed".to_string()
    } else {
        "Network Error".to_string()
    }
}

/// Single-status probe against a message broker status endpoint.
///
/// The endpoint answers 204 No Content when the broker is reachable; any
/// other response status is reported as a failure with the status reason as
/// detail.
pub struct BrokerProbe {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl BrokerProbe {
    /// Create a broker probe against the given status URL
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl Probe for BrokerProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(transport_detail(&e)))?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            Ok(ProbeOutcome::Single(ProbeResult::Healthy))
        } else {
            Ok(ProbeOutcome::Single(ProbeResult::Failed {
                detail: status_detail(response.status()),
            }))
        }
    }
}

/// Summary endpoint body: counts of abnormal sub-services
#[derive(Debug, Deserialize)]
struct HealthSummaryBody {
    health: Option<HealthCounts>,
}

#[derive(Debug, Deserialize)]
struct HealthCounts {
    #[serde(default)]
    warning: u64,
    #[serde(default)]
    error: u64,
}

/// Detail endpoint body: per-service state records
#[derive(Debug, Deserialize)]
struct ServicesBody {
    services: Option<ServiceList>,
}

#[derive(Debug, Deserialize)]
struct ServiceList {
    #[serde(default)]
    service: Vec<SubService>,
}

#[derive(Debug, Deserialize)]
struct SubService {
    #[serde(rename = "type")]
    service_type: String,
    service_state: String,
}

/// Two-stage probe over the backend services endpoints.
///
/// The summary endpoint reports how many sub-services are abnormal. Zero
/// means the whole group is healthy; a nonzero count triggers the detail
/// endpoint, which yields one entry per abnormal sub-service, named by
/// stripping the type-namespace prefix from its type identifier. A summary
/// response missing its expected fields is terminal for the cycle: the
/// detail stage is not attempted.
pub struct BackendServicesProbe {
    name: String,
    summary_url: String,
    detail_url: String,
    type_prefix: String,
    client: reqwest::Client,
}

impl BackendServicesProbe {
    /// Create a backend-services probe over the summary and detail URLs
    pub fn new(
        name: impl Into<String>,
        summary_url: impl Into<String>,
        detail_url: impl Into<String>,
        type_prefix: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            summary_url: summary_url.into(),
            detail_url: detail_url.into(),
            type_prefix: type_prefix.into(),
            client,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(transport_detail(&e)))?;

        if !response.status().is_success() {
            return Err(ProbeError::Transport(status_detail(response.status())));
        }

        response.json().await.map_err(|_| ProbeError::Malformed)
    }

    async fn check_detail(&self) -> Result<ProbeOutcome, ProbeError> {
        let body: ServicesBody = self.fetch_json(&self.detail_url).await?;
        let list = body.services.ok_or(ProbeError::Malformed)?;

        let mut entries = Vec::new();
        for sub in list.service {
            if sub.service_state == NOMINAL_STATE {
                continue;
            }
            let name = sub
                .service_type
                .strip_prefix(&self.type_prefix)
                .unwrap_or(&sub.service_type)
                .to_string();
            entries.push((
                name,
                ProbeResult::Failed {
                    detail: sub.service_state,
                },
            ));
        }
        Ok(ProbeOutcome::PerService(entries))
    }
}

#[async_trait]
impl Probe for BackendServicesProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        let body: HealthSummaryBody = self.fetch_json(&self.summary_url).await?;
        let counts = body.health.ok_or(ProbeError::Malformed)?;

        let abnormal = counts.warning + counts.error;
        if abnormal == 0 {
            return Ok(ProbeOutcome::Single(ProbeResult::Healthy));
        }

        debug!(
            probe = self.name.as_str(),
            abnormal, "summary reported abnormal services, fetching detail"
        );
        self.check_detail().await
    }
}
