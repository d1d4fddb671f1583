//! Integration tests for arriba-client
//!
//! These tests run an in-process vendor stub and point the real HTTP client
//! at it, so request shapes and error mapping are checked over the wire.

use std::sync::Arc;
use std::time::Duration;

use arriba_client::testing::TestServer;
use arriba_client::{ClientConfig, InstantOnClient};
use arriba_core::{
    Credential, DeviceStatus, LoginRequest, RadioControlRequest, RadioStatus, VendorClient,
};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rstest::rstest;
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// Last request body seen by the vendor stub
type Captured = Arc<Mutex<Option<Value>>>;

fn status_router(status: u16) -> Router {
    Router::new().route(
        "/api/sites",
        get(move || async move {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, "vendor says no")
        }),
    )
}

// =============================================================================
// Status pass-through
// =============================================================================

#[rstest]
#[case(401)]
#[case(403)]
#[case(404)]
#[case(500)]
#[case(503)]
#[tokio::test]
async fn vendor_status_is_preserved(#[case] status: u16) {
    let server = TestServer::start(status_router(status)).await.unwrap();
    let client = server.vendor_client().unwrap();

    let err = client.list_sites("token").await.unwrap_err();

    assert_eq!(err.status_code(), status);
    assert!(err.to_string().contains("Failed to get sites"));
    assert!(err.to_string().contains("vendor says no"));
}

#[tokio::test]
async fn transport_timeout_maps_to_408() {
    let router = Router::new().route(
        "/api/sites",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "elements": [] }))
        }),
    );
    let server = TestServer::start(router).await.unwrap();
    let config = ClientConfig {
        timeout: Duration::from_millis(200),
        ..server.vendor_config()
    };
    let client = InstantOnClient::with_config(&config).unwrap();

    let err = client.list_sites("token").await.unwrap_err();

    assert_eq!(err.status_code(), 408);
}

#[tokio::test]
async fn connection_refused_maps_to_503() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        api_url: format!("http://{}/api", addr),
        ..ClientConfig::default()
    };
    let client = InstantOnClient::with_config(&config).unwrap();

    let err = client.list_sites("token").await.unwrap_err();

    assert_eq!(err.status_code(), 503);
}

#[tokio::test]
async fn malformed_success_body_maps_to_500() {
    let router = Router::new().route("/api/sites", get(|| async { "<html>not json</html>" }));
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let err = client.list_sites("token").await.unwrap_err();

    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn null_site_body_is_not_found() {
    let router = Router::new().route("/api/sites/{site_id}", get(|| async { Json(Value::Null) }));
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let err = client.get_site("token", "s1").await.unwrap_err();

    assert_eq!(err.status_code(), 404);
}

// =============================================================================
// Authentication
// =============================================================================

async fn capture_login(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    *captured.lock().await = Some(body);
    Json(json!({
        "access_token": "T1",
        "refresh_token": "R1",
        "expires_in": 3600,
        "token_type": "Bearer"
    }))
}

#[tokio::test]
async fn login_issues_credential() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/aio/api/v1/mfa/validate/full", post(capture_login))
        .with_state(captured.clone());
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let before = chrono::Utc::now();
    let grant = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap();
    let credential = Credential::issued(grant, chrono::Utc::now());

    assert_eq!(credential.access_token, "T1");
    assert_eq!(credential.refresh_token.as_deref(), Some("R1"));
    let lifetime = (credential.expires_at - before).num_seconds();
    assert!((3600..=3605).contains(&lifetime), "lifetime {lifetime}");

    let body = captured.lock().await.clone().unwrap();
    assert_eq!(body, json!({ "username": "a@b.com", "password": "secret" }));
}

#[tokio::test]
async fn login_rejection_keeps_vendor_status() {
    let router = Router::new().route(
        "/aio/api/v1/mfa/validate/full",
        post(|| async { (StatusCode::FORBIDDEN, "account locked") }),
    );
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let err = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 403);
    assert!(err.to_string().starts_with("Authentication failed"));
}

#[tokio::test]
async fn login_without_access_token_is_invalid() {
    let router = Router::new().route(
        "/aio/api/v1/mfa/validate/full",
        post(|| async { Json(json!({ "expires_in": 3600 })) }),
    );
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let err = client
        .login(&LoginRequest::new("a@b.com", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn refresh_sends_refresh_token() {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/aio/api/v1/refresh",
            post(
                |State(captured): State<Captured>, Json(body): Json<Value>| async move {
                    *captured.lock().await = Some(body);
                    Json(json!({ "access_token": "T2", "expires_in": 60 }))
                },
            ),
        )
        .with_state(captured.clone());
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let grant = client.refresh_token("R1").await.unwrap();

    assert_eq!(grant.access_token, "T2");
    assert_eq!(grant.refresh_token.as_deref(), Some("R1"));
    let body = captured.lock().await.clone().unwrap();
    assert_eq!(body, json!({ "refresh_token": "R1" }));
}

// =============================================================================
// Topology
// =============================================================================

#[tokio::test]
async fn requests_carry_bearer_token() {
    let router = Router::new().route(
        "/api/sites/{site_id}/devices",
        get(|Path(site_id): Path<String>, headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if auth != "Bearer T1" {
                return (StatusCode::UNAUTHORIZED, Json(json!({})));
            }
            (
                StatusCode::OK,
                Json(json!({
                    "elements": [
                        { "id": format!("{site_id}-d1"), "name": "AP", "macAddress": "m", "status": "up" }
                    ]
                })),
            )
        }),
    );
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let devices = client.list_devices("T1", "s1").await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].id, "s1-d1");
    assert_eq!(devices[0].status, DeviceStatus::Online);

    let err = client.list_devices("other", "s1").await.unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn empty_radio_envelope_yields_empty_list() {
    let router = Router::new().route(
        "/api/sites/{site_id}/devices/{device_id}/radios",
        get(|| async { Json(json!({ "elements": null })) }),
    );
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let radios = client.list_radios("T1", "s1", "d1").await.unwrap();

    assert!(radios.is_empty());
}

// =============================================================================
// Radio control
// =============================================================================

async fn capture_patch(
    State(captured): State<Captured>,
    Path((_site, _device, radio_id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.lock().await = Some(body.clone());
    let enabled = body.get("enabled").and_then(Value::as_bool).unwrap_or(true);
    Json(json!({
        "id": radio_id,
        "band": "5GHz",
        "channel": body.get("channel").cloned().unwrap_or(json!(36)),
        "channelWidth": 40,
        "transmitPower": 20,
        "enabled": enabled,
        "status": if enabled { "active" } else { "disabled" }
    }))
}

fn patch_router(captured: Captured) -> Router {
    Router::new()
        .route(
            "/api/sites/{site_id}/devices/{device_id}/radios/{radio_id}",
            patch(capture_patch),
        )
        .with_state(captured)
}

#[tokio::test]
async fn toggle_sends_enabled_only() {
    let captured = Captured::default();
    let server = TestServer::start(patch_router(captured.clone())).await.unwrap();
    let client = server.vendor_client().unwrap();

    let request = RadioControlRequest::toggle("d1", "r1", false);
    let response = client.control_radio("T1", "s1", &request).await.unwrap();

    let body = captured.lock().await.clone().unwrap();
    assert_eq!(body, json!({ "enabled": false }));

    let radio = response.radio.unwrap();
    assert!(response.success);
    assert_eq!(radio.id, "r1");
    assert!(!radio.enabled);
    assert_eq!(radio.status, RadioStatus::Disabled);
}

#[tokio::test]
async fn channel_update_omits_other_fields() {
    let captured = Captured::default();
    let server = TestServer::start(patch_router(captured.clone())).await.unwrap();
    let client = server.vendor_client().unwrap();

    let request = RadioControlRequest::new("d1", "r1").with_channel(11);
    let response = client.control_radio("T1", "s1", &request).await.unwrap();

    let body = captured.lock().await.clone().unwrap();
    assert_eq!(body, json!({ "channel": 11 }));
    assert_eq!(response.radio.unwrap().channel, 11);
}

#[tokio::test]
async fn empty_control_reply_has_no_radio() {
    let router = Router::new().route(
        "/api/sites/{site_id}/devices/{device_id}/radios/{radio_id}",
        patch(|| async { StatusCode::NO_CONTENT }),
    );
    let server = TestServer::start(router).await.unwrap();
    let client = server.vendor_client().unwrap();

    let request = RadioControlRequest::toggle("d1", "r1", true);
    let response = client.control_radio("T1", "s1", &request).await.unwrap();

    assert!(response.success);
    assert!(response.radio.is_none());
}
