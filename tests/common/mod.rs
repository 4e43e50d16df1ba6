#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use beer_stock_api::{app_router, config::AppConfig, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Helper harness for spinning up the full router over a fresh store.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

fn test_config(store_backend: &str) -> AppConfig {
    // Minimal configuration suitable for tests.
    let mut cfg = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        18_080,
        "test".to_string(),
    );
    cfg.store_backend = store_backend.to_string();
    cfg.auto_migrate = true;
    // A single pooled connection keeps the in-memory database alive and shared.
    cfg.db_max_connections = 1;
    cfg.db_min_connections = 1;
    cfg
}

impl TestApp {
    /// Application backed by a migrated in-memory SQLite database.
    pub async fn new() -> Self {
        Self::with_config(test_config("sql")).await
    }

    /// Application backed by the process-local store.
    pub async fn in_memory() -> Self {
        Self::with_config(test_config("in-memory")).await
    }

    async fn with_config(cfg: AppConfig) -> Self {
        let state = AppState::from_config(cfg)
            .await
            .expect("failed to build test application state");
        let router = app_router(state.clone());
        Self { router, state }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let body = body.map(|json| {
            serde_json::to_string(&json).expect("failed to serialize json request body")
        });
        self.request_raw(method, uri, body).await
    }

    /// Send a request whose body is passed through untouched.
    pub async fn request_raw(&self, method: Method, uri: &str, body: Option<String>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(raw) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(raw)
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
