//! Probe and registry tests

#![cfg(test)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::utils::error::MonitorError;

use super::http::{BackendServicesProbe, BrokerProbe};
use super::registry::ProbeRegistry;
use super::types::{Probe, ProbeError, ProbeOutcome, ProbeResult};

struct NamedProbe(&'static str);

#[async_trait::async_trait]
impl Probe for NamedProbe {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        Ok(ProbeOutcome::Single(ProbeResult::Healthy))
    }
}

// ==================== Registry Tests ====================

#[test]
fn test_registry_preserves_registration_order() {
    let mut registry = ProbeRegistry::new();
    registry.register(Arc::new(NamedProbe("b"))).unwrap();
    registry.register(Arc::new(NamedProbe("a"))).unwrap();
    registry.register(Arc::new(NamedProbe("c"))).unwrap();

    let names: Vec<&str> = registry.probes().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_registry_rejects_duplicate_name() {
    let mut registry = ProbeRegistry::new();
    registry.register(Arc::new(NamedProbe("broker"))).unwrap();

    let err = registry
        .register(Arc::new(NamedProbe("broker")))
        .unwrap_err();
    assert!(matches!(err, MonitorError::DuplicateProbe(name) if name == "broker"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_starts_empty() {
    let registry = ProbeRegistry::new();
    assert!(registry.is_empty());
}

#[test]
fn test_probe_error_display() {
    assert_eq!(ProbeError::Malformed.to_string(), "Malformed Data");
    assert_eq!(
        ProbeError::Transport("Service Unavailable".to_string()).to_string(),
        "Service Unavailable"
    );
}

// ==================== Broker Probe Tests ====================

fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_broker_probe_no_content_is_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broker/status"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let probe = BrokerProbe::new(
        "ActiveMQ",
        format!("{}/broker/status", server.uri()),
        test_client(),
    );

    let outcome = probe.check().await.unwrap();
    assert_eq!(outcome, ProbeOutcome::Single(ProbeResult::Healthy));
}

#[tokio::test]
async fn test_broker_probe_other_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broker/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let probe = BrokerProbe::new(
        "ActiveMQ",
        format!("{}/broker/status", server.uri()),
        test_client(),
    );

    let outcome = probe.check().await.unwrap();
    assert_eq!(
        outcome,
        ProbeOutcome::Single(ProbeResult::Failed {
            detail: "Service Unavailable".to_string()
        })
    );
}

#[tokio::test]
async fn test_broker_probe_ordinary_ok_is_still_failure() {
    // Only 204 counts as healthy; a plain 200 is not the expected answer.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broker/status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let probe = BrokerProbe::new(
        "ActiveMQ",
        format!("{}/broker/status", server.uri()),
        test_client(),
    );

    let outcome = probe.check().await.unwrap();
    assert_eq!(
        outcome,
        ProbeOutcome::Single(ProbeResult::Failed {
            detail: "OK".to_string()
        })
    );
}

#[tokio::test]
async fn test_broker_probe_connection_failure_is_transport_error() {
    let server = MockServer::start().await;
    let url = format!("{}/broker/status", server.uri());
    drop(server);

    let probe = BrokerProbe::new("ActiveMQ", url, test_client());

    let err = probe.check().await.unwrap_err();
    assert!(matches!(err, ProbeError::Transport(_)));
}

// ==================== Backend Services Probe Tests ====================

fn backend_probe(server: &MockServer) -> BackendServicesProbe {
    BackendServicesProbe::new(
        "Backend Services",
        format!("{}/services/health.json", server.uri()),
        format!("{}/services/services.json", server.uri()),
        "opencastproject.",
        test_client(),
    )
}

async fn mount_summary(server: &MockServer, warning: u64, error: u64) {
    Mock::given(method("GET"))
        .and(path("/services/health.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health": { "warning": warning, "error": error }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_summary_zero_abnormal_is_healthy() {
    let server = MockServer::start().await;
    mount_summary(&server, 0, 0).await;

    let outcome = backend_probe(&server).check().await.unwrap();
    assert_eq!(outcome, ProbeOutcome::Single(ProbeResult::Healthy));
}

#[tokio::test]
async fn test_summary_missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/health.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = backend_probe(&server).check().await.unwrap_err();
    assert_eq!(err, ProbeError::Malformed);
}

#[tokio::test]
async fn test_summary_http_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/health.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = backend_probe(&server).check().await.unwrap_err();
    assert_eq!(
        err,
        ProbeError::Transport("Internal Server Error".to_string())
    );
}

#[tokio::test]
async fn test_detail_filters_nominal_and_strips_prefix() {
    let server = MockServer::start().await;
    mount_summary(&server, 1, 1).await;
    Mock::given(method("GET"))
        .and(path("/services/services.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": { "service": [
                { "type": "opencastproject.composer", "service_state": "ERROR" },
                { "type": "opencastproject.ingest", "service_state": "NORMAL" },
                { "type": "opencastproject.workflow", "service_state": "WARNING" }
            ]}
        })))
        .mount(&server)
        .await;

    let outcome = backend_probe(&server).check().await.unwrap();
    assert_eq!(
        outcome,
        ProbeOutcome::PerService(vec![
            (
                "composer".to_string(),
                ProbeResult::Failed {
                    detail: "ERROR".to_string()
                }
            ),
            (
                "workflow".to_string(),
                ProbeResult::Failed {
                    detail: "WARNING".to_string()
                }
            ),
        ])
    );
}

#[tokio::test]
async fn test_detail_all_nominal_yields_no_entries() {
    let server = MockServer::start().await;
    mount_summary(&server, 0, 2).await;
    Mock::given(method("GET"))
        .and(path("/services/services.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": { "service": [
                { "type": "opencastproject.composer", "service_state": "NORMAL" }
            ]}
        })))
        .mount(&server)
        .await;

    let outcome = backend_probe(&server).check().await.unwrap();
    assert_eq!(outcome, ProbeOutcome::PerService(Vec::new()));
}

#[tokio::test]
async fn test_detail_missing_field_is_malformed() {
    let server = MockServer::start().await;
    mount_summary(&server, 0, 1).await;
    Mock::given(method("GET"))
        .and(path("/services/services.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = backend_probe(&server).check().await.unwrap_err();
    assert_eq!(err, ProbeError::Malformed);
}

#[tokio::test]
async fn test_detail_unprefixed_type_keeps_full_identifier() {
    let server = MockServer::start().await;
    mount_summary(&server, 0, 1).await;
    Mock::given(method("GET"))
        .and(path("/services/services.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": { "service": [
                { "type": "thirdparty.transcoder", "service_state": "ERROR" }
            ]}
        })))
        .mount(&server)
        .await;

    let outcome = backend_probe(&server).check().await.unwrap();
    assert_eq!(
        outcome,
        ProbeOutcome::PerService(vec![(
            "thirdparty.transcoder".to_string(),
            ProbeResult::Failed {
                detail: "ERROR".to_string()
            }
        )])
    );
}
