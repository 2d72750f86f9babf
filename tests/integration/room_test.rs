//! Integration tests for the room occupancy flow.

use http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_status_starts_vacant() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/status", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["occupied"], Value::Bool(false));
    assert!(response.body.get("occupiedMinutes").is_none());
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new().await;

    // Enter: fresh room, empty content, protocol config advertised.
    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(true));
    assert_eq!(response.body["content"]["text"], Value::String(String::new()));
    assert_eq!(response.body["content"]["drawing"], Value::Null);
    assert_eq!(
        response.body["config"]["heartbeatInterval"],
        json!(app.config.lease.heartbeat_interval_seconds * 1000)
    );
    assert_eq!(
        response.body["config"]["maxTextLength"],
        json!(app.config.lease.max_text_length)
    );
    let session_id = response.body["sessionId"].as_str().expect("sessionId").to_string();

    // Heartbeat renews.
    let response = app
        .request("POST", "/api/heartbeat", Some(json!({"sessionId": session_id})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(true));

    // Leave with a content handoff.
    let response = app
        .request(
            "POST",
            "/api/leave",
            Some(json!({"sessionId": session_id, "content": {"text": "hello"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(true));

    // The next entrant sees the handoff.
    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.body["success"], Value::Bool(true));
    assert_eq!(response.body["content"]["text"], Value::String("hello".to_string()));

    // The released token is dead.
    let response = app
        .request("POST", "/api/heartbeat", Some(json!({"sessionId": session_id})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["terminated"], Value::Bool(true));
}

#[tokio::test]
async fn test_second_enter_is_rejected_while_occupied() {
    let app = TestApp::new().await;
    let _session = app.enter().await;

    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(
        response.body["error"],
        Value::String("Room is occupied".to_string())
    );

    let response = app.request("GET", "/api/status", None).await;
    assert_eq!(response.body["occupied"], Value::Bool(true));
    assert_eq!(response.body["occupiedMinutes"], json!(0));
}

#[tokio::test]
async fn test_leave_with_foreign_token_is_not_owner() {
    let app = TestApp::new().await;
    let _session = app.enter().await;

    let stranger = uuid::Uuid::new_v4().to_string();
    let response = app
        .request("POST", "/api/leave", Some(json!({"sessionId": stranger})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["error"], Value::String("not_owner".to_string()));

    // The holder is unaffected.
    let response = app.request("GET", "/api/status", None).await;
    assert_eq!(response.body["occupied"], Value::Bool(true));
}

#[tokio::test]
async fn test_leave_merges_content_fields_independently() {
    let app = TestApp::new().await;
    let drawing = "aGVsbG8gZHJhd2luZw==";

    let session = app.enter().await;
    app.request(
        "POST",
        "/api/leave",
        Some(json!({"sessionId": session, "content": {"text": "first", "drawing": drawing}})),
    )
    .await;

    // Leaving with only text keeps the stored drawing.
    let session = app.enter().await;
    app.request(
        "POST",
        "/api/leave",
        Some(json!({"sessionId": session, "content": {"text": "second"}})),
    )
    .await;

    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.body["content"]["text"], Value::String("second".to_string()));
    assert_eq!(
        response.body["content"]["drawing"],
        Value::String(drawing.to_string())
    );
}

#[tokio::test]
async fn test_leave_with_invalid_drawing_is_rejected() {
    let app = TestApp::new().await;
    let session = app.enter().await;

    let response = app
        .request(
            "POST",
            "/api/leave",
            Some(json!({"sessionId": session, "content": {"drawing": "not base64!!!"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // The rejection did not consume the session.
    let response = app
        .request("POST", "/api/leave", Some(json!({"sessionId": session})))
        .await;
    assert_eq!(response.body["success"], Value::Bool(true));
}

#[tokio::test]
async fn test_heartbeat_on_vacant_room_reports_terminated() {
    let app = TestApp::new().await;

    let stranger = uuid::Uuid::new_v4().to_string();
    let response = app
        .request("POST", "/api/heartbeat", Some(json!({"sessionId": stranger})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["terminated"], Value::Bool(true));
}

#[tokio::test]
async fn test_released_token_cannot_release_again() {
    let app = TestApp::new().await;
    let session = app.enter().await;

    let response = app
        .request("POST", "/api/leave", Some(json!({"sessionId": session})))
        .await;
    assert_eq!(response.body["success"], Value::Bool(true));

    let response = app
        .request("POST", "/api/leave", Some(json!({"sessionId": session})))
        .await;
    assert_eq!(response.body["success"], Value::Bool(false));
    assert_eq!(response.body["error"], Value::String("not_owner".to_string()));
}

#[tokio::test]
async fn test_overlong_text_is_truncated_at_the_boundary() {
    let app = TestApp::new().await;
    let max = app.config.lease.max_text_length;

    let session = app.enter().await;
    app.request(
        "POST",
        "/api/leave",
        Some(json!({"sessionId": session, "content": {"text": "x".repeat(max + 200)}})),
    )
    .await;

    let response = app.request("POST", "/api/enter", None).await;
    let text = response.body["content"]["text"].as_str().expect("text");
    assert_eq!(text.chars().count(), max);
}

#[tokio::test]
async fn test_store_outage_is_not_reported_as_occupied() {
    let app = TestApp::new().await;

    app.store.set_unavailable(true);
    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body["error"],
        Value::String("SERVICE_UNAVAILABLE".to_string())
    );

    // Nothing was granted: the room is enterable once the store recovers.
    app.store.set_unavailable(false);
    let response = app.request("POST", "/api/enter", None).await;
    assert_eq!(response.body["success"], Value::Bool(true));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], Value::String("ok".to_string()));
}
