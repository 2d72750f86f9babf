//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use soloroom_core::config::AppConfig;
use soloroom_service::{LeaseManager, RateLimiter};
use soloroom_store::MemoryStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The in-memory lease store, for simulating outages
    pub store: Arc<MemoryStore>,
    /// Application config
    pub config: AppConfig,
}

/// Default test configuration: admin secret set, generous rate limits so
/// occupancy tests never trip the limiter.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.admin.secret = "test-secret".to_string();
    config.rate_limit.entry_limit = 100;
    config.rate_limit.heartbeat_limit = 100;
    config
}

impl TestApp {
    /// Create a test application with the default test configuration.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application over the given configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        config.validate().expect("test config should validate");

        let store = Arc::new(MemoryStore::new());
        let lease_manager = Arc::new(
            LeaseManager::open(store.clone(), config.lease.clone())
                .await
                .expect("Failed to open lease manager"),
        );
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        let state = soloroom_api::AppState {
            config: Arc::new(config.clone()),
            lease_manager,
            rate_limiter,
        };

        let router = soloroom_api::build_app(state);

        Self {
            router,
            store,
            config,
        }
    }

    /// Make an HTTP request from the default test client address.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_from("10.0.0.1:40000", method, path, body)
            .await
    }

    /// Make an HTTP request from a specific client address.
    pub async fn request_from(
        &self,
        peer: &str,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        let mut req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let addr: SocketAddr = peer.parse().expect("Bad peer address");
        req.extensions_mut().insert(ConnectInfo(addr));

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Enter the room, asserting success, and return the session id.
    pub async fn enter(&self) -> String {
        let response = self.request("POST", "/api/enter", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body.get("success"),
            Some(&Value::Bool(true)),
            "Enter failed: {:?}",
            response.body
        );
        response.body["sessionId"]
            .as_str()
            .expect("No sessionId in enter response")
            .to_string()
    }

    /// Call `GET /api/admin/status`, optionally with the secret header.
    pub async fn admin_status(&self, secret: &str) -> TestResponse {
        let mut req = Request::builder()
            .method("GET")
            .uri("/api/admin/status")
            .body(Body::empty())
            .expect("Failed to build request");

        if !secret.is_empty() {
            req.headers_mut()
                .insert("x-admin-secret", secret.parse().expect("header value"));
        }

        let addr: SocketAddr = "10.0.0.1:40000".parse().expect("peer address");
        req.extensions_mut().insert(ConnectInfo(addr));

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
