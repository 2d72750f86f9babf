//! Integration tests for the admin surface.

use http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_admin_endpoints_require_the_secret() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/admin/clear", Some(json!({"secret": "wrong"})))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.admin_status("wrong").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.admin_status("").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_endpoints_disabled_without_a_secret() {
    let mut config = test_config();
    config.admin.secret = String::new();
    let app = TestApp::with_config(config).await;

    // Even presenting the empty string must not authorize.
    let response = app
        .request("POST", "/api/admin/clear", Some(json!({"secret": ""})))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_force_clear_vacates_and_wipes_content() {
    let app = TestApp::new().await;

    // Seed content, then occupy.
    let session = app.enter().await;
    app.request(
        "POST",
        "/api/leave",
        Some(json!({"sessionId": session, "content": {"text": "wipe me", "drawing": "aGVsbG8="}})),
    )
    .await;
    let session = app.enter().await;

    let response = app
        .request(
            "POST",
            "/api/admin/clear",
            Some(json!({"secret": "test-secret"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(true));

    // The evicted holder's token is dead.
    let response = app
        .request("POST", "/api/heartbeat", Some(json!({"sessionId": session})))
        .await;
    assert_eq!(response.body["terminated"], Value::Bool(true));

    // The room is vacant with empty content.
    let response = app.admin_status("test-secret").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["record"]["occupied"], Value::Bool(false));
    assert_eq!(response.body["record"]["holderId"], Value::Null);
    assert_eq!(
        response.body["record"]["content"]["text"],
        Value::String(String::new())
    );
    assert_eq!(response.body["record"]["content"]["drawing"], Value::Null);

    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(
        response.body["content"]["text"],
        Value::String(String::new())
    );
}

#[tokio::test]
async fn test_admin_status_reports_record_and_config() {
    let app = TestApp::new().await;
    let session = app.enter().await;

    let response = app.admin_status("test-secret").await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(response.body["record"]["occupied"], Value::Bool(true));
    assert_eq!(
        response.body["record"]["holderId"],
        Value::String(session.clone())
    );
    assert!(response.body["record"]["occupiedSince"].is_string());
    assert!(response.body["record"]["lastHeartbeatAt"].is_string());

    assert_eq!(
        response.body["config"]["lease"]["heartbeat_timeout_seconds"],
        json!(app.config.lease.heartbeat_timeout_seconds)
    );
    assert_eq!(
        response.body["config"]["rateLimit"]["entry_limit"],
        json!(app.config.rate_limit.entry_limit)
    );
}
