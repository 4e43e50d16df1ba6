mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::{json, Value};

fn brahma() -> Value {
    json!({
        "name": "Brahma",
        "brand": "Ambev",
        "max": 50,
        "quantity": 10,
        "type": "LAGER"
    })
}

async fn create(app: &TestApp, payload: Value) -> Value {
    let response = app
        .request(Method::POST, "/api/v1/beers", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await
}

#[tokio::test]
async fn beer_lifecycle() {
    let app = TestApp::new().await;

    let created = create(&app, brahma()).await;
    assert_eq!(created["name"], "Brahma");
    assert_eq!(created["brand"], "Ambev");
    assert_eq!(created["max"], 50);
    assert_eq!(created["quantity"], 10);
    assert_eq!(created["type"], "LAGER");
    let id = created["id"].as_i64().expect("beer id");

    // Fetch by name
    let response = app.request(Method::GET, "/api/v1/beers/Brahma", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["id"].as_i64(), Some(id));

    // Listed
    let response = app.request(Method::GET, "/api/v1/beers", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = response_json(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    // Increment by 10
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/increment"),
            Some(json!({ "quantity": 10 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["quantity"], 20);

    // Decrement by 5
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/decrement"),
            Some(json!({ "quantity": 5 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["quantity"], 15);

    // Delete
    let response = app
        .request(Method::DELETE, &format!("/api/v1/beers/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.request(Method::GET, "/api/v1/beers/Brahma", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::GET, "/api/v1/beers", None).await;
    assert_eq!(response_json(response).await, json!([]));
}

#[tokio::test]
async fn duplicate_name_is_conflict() {
    let app = TestApp::new().await;
    create(&app, brahma()).await;

    let response = app
        .request(Method::POST, "/api/v1/beers", Some(brahma()))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Conflict");
    assert!(body["message"].as_str().unwrap().contains("Brahma"));
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/v1/beers",
            Some(json!({ "name": "Brahma", "max": 50, "quantity": 10, "type": "LAGER" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Bad Request");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .request_raw(
            Method::POST,
            "/api/v1/beers",
            Some("{\"name\": \"Brahma\",".to_string()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_fields_are_rejected() {
    let app = TestApp::new().await;

    let mut payload = brahma();
    payload["max"] = json!(501);
    let response = app
        .request(Method::POST, "/api/v1/beers", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut payload = brahma();
    payload["type"] = json!("PILSEN");
    let response = app
        .request(Method::POST, "/api/v1/beers", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut payload = brahma();
    payload["quantity"] = json!(60);
    let response = app
        .request(Method::POST, "/api/v1/beers", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_name_and_id_are_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/beers/Skol", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Beer not found: name Skol");

    let response = app.request(Method::DELETE, "/api/v1/beers/2", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for action in ["increment", "decrement"] {
        let response = app
            .request(
                Method::PATCH,
                &format!("/api/v1/beers/2/{action}"),
                Some(json!({ "quantity": 10 })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = TestApp::new().await;
    let response = app.request(Method::DELETE, "/api/v1/beers/abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn increment_past_capacity_is_rejected_and_stock_kept() {
    let app = TestApp::new().await;
    let created = create(&app, brahma()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/increment"),
            Some(json!({ "quantity": 45 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("55"));

    let response = app.request(Method::GET, "/api/v1/beers/Brahma", None).await;
    assert_eq!(response_json(response).await["quantity"], 10);
}

#[tokio::test]
async fn decrement_below_zero_is_rejected() {
    let app = TestApp::new().await;
    let created = create(&app, brahma()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/decrement"),
            Some(json!({ "quantity": 11 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.request(Method::GET, "/api/v1/beers/Brahma", None).await;
    assert_eq!(response_json(response).await["quantity"], 10);
}

#[tokio::test]
async fn zero_adjustment_is_bad_request() {
    let app = TestApp::new().await;
    let created = create(&app, brahma()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/increment"),
            Some(json!({ "quantity": 0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn in_memory_backend_serves_the_same_routes() {
    let app = TestApp::in_memory().await;
    let created = create(&app, brahma()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/beers/{id}/increment"),
            Some(json!({ "quantity": 40 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["quantity"], 50);

    let response = app
        .request(Method::POST, "/api/v1/beers", Some(brahma()))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_reports_up_and_request_id_is_echoed() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response_json(response).await["status"], "up");
}

#[tokio::test]
async fn error_body_carries_request_id() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/v1/beers/Skol", None).await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");
    let body = response_json(response).await;
    assert_eq!(body["request_id"], header.as_str());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = response_json(response).await;
    assert!(doc["paths"]["/api/v1/beers"].is_object());
}
