//! Integration tests for the bridge connector using wiremock
//!
//! These tests mock the compliance bridge to verify the connector's HTTP
//! behavior and the full connector-plus-retriever path.

use wardlink_core::{RetrievalError, Transport, TransportError, retrieval::RetrievalRequest};
use wardlink_egress::bridge::{BridgeConfig, BridgeConnector};
use wardlink_egress::client::HttpClientConfig;
use wardlink_retrieval::ComplianceGatedRetriever;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn no_retry_config(mock_server: &MockServer) -> BridgeConfig {
    BridgeConfig::new(mock_server.uri())
        .with_api_key("test-key")
        .with_client_config(HttpClientConfig {
            max_retries: 0,
            ..Default::default()
        })
}

#[tokio::test]
async fn test_bridge_send_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .and(header("x-api-key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "action": "host_snapshot",
            "target_id": "host-42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "compliant": true,
            "host_snapshot": {
                "host_id": "host-42",
                "hrv_ms": 48.0,
                "thermo_c": 21.5,
                "duty_fraction": 0.4,
                "fps": 90.0,
                "fov_deg": 110.0,
                "snr_db": 18.5
            }
        })))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();

    let response = connector
        .send(RetrievalRequest::host_snapshot("host-42"))
        .await
        .unwrap();

    assert!(response.compliant);
    let snapshot = response.host_snapshot.expect("snapshot present");
    assert_eq!(snapshot.host_id, "host-42");
    assert_eq!(snapshot.thermo_c, 21.5);
    assert!(response.session_envelope.is_none());
}

#[tokio::test]
async fn test_bridge_non_compliant_is_not_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "compliant": false,
            "reason": "corridor breach"
        })))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();

    // The connector reports the exchange as successful; gating happens upstream
    let response = connector
        .send(RetrievalRequest::corridor_envelope("sess-7"))
        .await
        .unwrap();

    assert!(!response.compliant);
    assert_eq!(response.reason.as_deref(), Some("corridor breach"));
}

#[tokio::test]
async fn test_bridge_rate_limited_maps_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();

    let err = connector
        .send(RetrievalRequest::host_snapshot("host-42"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::RateLimited {
            retry_after_secs: Some(7)
        }
    ));
}

#[tokio::test]
async fn test_bridge_server_error_maps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .respond_with(ResponseTemplate::new(503).set_body_string("bridge draining"))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();

    let err = connector
        .send(RetrievalRequest::host_snapshot("host-42"))
        .await
        .unwrap_err();

    match err {
        TransportError::Status {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "bridge draining");
        }
        other => panic!("expected Status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bridge_client_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown host"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Retries enabled, but a 404 must fail fast
    let config = BridgeConfig::new(mock_server.uri()).with_api_key("test-key");
    let connector = BridgeConnector::new(config).unwrap();

    let err = connector
        .send(RetrievalRequest::host_snapshot("host-42"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Status {
            status_code: 404,
            ..
        }
    ));
}

#[tokio::test]
async fn test_bridge_invalid_json_maps_decode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();

    let err = connector
        .send(RetrievalRequest::host_snapshot("host-42"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_retriever_over_bridge_returns_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .and(body_partial_json(serde_json::json!({
            "action": "host_snapshot",
            "target_id": "host-42"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "compliant": true,
            "host_snapshot": {
                "host_id": "host-42",
                "hrv_ms": 48.0,
                "thermo_c": 21.5,
                "duty_fraction": 0.4,
                "fps": 90.0,
                "fov_deg": 110.0,
                "snr_db": 18.5
            }
        })))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();
    let retriever = ComplianceGatedRetriever::new(connector);

    let snapshot = retriever.fetch_host_snapshot("host-42").await.unwrap();
    assert_eq!(snapshot.thermo_c, 21.5);
}

#[tokio::test]
async fn test_retriever_over_bridge_enters_degraded_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/retrieval"))
        .and(body_partial_json(serde_json::json!({
            "action": "corridor_envelope",
            "target_id": "sess-7"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "compliant": false
        })))
        .mount(&mock_server)
        .await;

    let connector = BridgeConnector::new(no_retry_config(&mock_server)).unwrap();
    let retriever = ComplianceGatedRetriever::new(connector);

    let err = retriever.fetch_corridor_envelope("sess-7").await.unwrap_err();
    assert!(matches!(err, RetrievalError::NonCompliant { .. }));
}
