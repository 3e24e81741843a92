use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_availability_requires_all_fields() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/availability")
        .json(&json!({ "providerId": Uuid::new_v4(), "startTime": "2025-07-27T09:00" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: Missing required fields: startTime, endTime, providerId"
    );
}

#[tokio::test]
async fn test_create_availability_rejects_inverted_window() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/availability")
        .json(&json!({
            "providerId": Uuid::new_v4(),
            "startTime": "2025-07-27T17:00",
            "endTime": "2025-07-27T09:00",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_availability_requires_provider_id() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/availability/me")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_with_database_down_is_a_generic_server_error() {
    let server = TestContext::new().server();

    let response = server.get("/api/availability").expect_failure().await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_create_availability_rejects_malformed_provider_id() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/availability")
        .json(&json!({
            "providerId": 42,
            "startTime": "2025-07-27T09:00",
            "endTime": "2025-07-27T17:00",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_registration_rejects_non_object_body() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/providers")
        .json(&json!("Dr. Smith"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
