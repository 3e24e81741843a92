use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_core::errors::{NO_EXACT_MATCH_MESSAGE, NO_PROVIDER_AVAILABLE_MESSAGE};
use test_log::test;
use uuid::Uuid;

use crate::test_utils::{TestContext, at, window};

fn booking_request(start: &str, end: &str) -> Value {
    json!({
        "startTime": start,
        "endTime": end,
        "customerId": Uuid::new_v4(),
    })
}

#[test(tokio::test)]
async fn test_request_booking_confirms_free_provider() {
    let ctx = TestContext::new();
    let provider_id = ctx.store.add_provider("Dr. Smith").unwrap();
    ctx.store
        .add_availability(provider_id, window((9, 0), (17, 0)))
        .unwrap();
    let server = ctx.server();

    let response = server
        .post("/api/booking-request")
        .json(&booking_request("2025-07-27T10:00", "2025-07-27T11:00"))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["provider"]["id"], provider_id.to_string());
    assert_eq!(body["provider"]["name"], "Dr. Smith");
    assert_eq!(body["startTime"], "2025-07-27T10:00:00Z");
    assert_eq!(body["endTime"], "2025-07-27T11:00:00Z");
    assert_eq!(body["status"], "confirmed");

    let bookings = ctx.store.bookings().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(body["bookingId"], bookings[0].id.to_string());
}

#[test(tokio::test)]
async fn test_second_request_for_same_slot_gets_suggestions() {
    let ctx = TestContext::new();
    let provider_id = ctx.store.add_provider("Dr. Smith").unwrap();
    ctx.store
        .add_availability(provider_id, window((9, 0), (12, 0)))
        .unwrap();
    let server = ctx.server();

    server
        .post("/api/booking-request")
        .json(&booking_request("2025-07-27T10:00:00Z", "2025-07-27T11:00:00Z"))
        .await
        .assert_status(StatusCode::OK);

    let response = server
        .post("/api/booking-request")
        .json(&booking_request("2025-07-27T10:00:00Z", "2025-07-27T11:00:00Z"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], NO_EXACT_MATCH_MESSAGE);

    // 09:00 and 11:00 are equally close; the earlier one is generated first
    let starts: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["startTime"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["2025-07-27T09:00:00Z", "2025-07-27T11:00:00Z"]);
    assert_eq!(body["suggestions"][0]["timeDifference"], 3_600_000);
    assert_eq!(body["suggestions"][1]["providerName"], "Dr. Smith");
    assert_eq!(ctx.store.bookings().unwrap().len(), 1);
}

#[test(tokio::test)]
async fn test_request_booking_with_no_availability() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/booking-request")
        .json(&booking_request("2025-07-27T10:00", "2025-07-27T11:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({
        "error": NO_PROVIDER_AVAILABLE_MESSAGE,
        "suggestions": [],
    }));
}

#[test(tokio::test)]
async fn test_request_booking_rejects_inverted_window() {
    let ctx = TestContext::new();
    let provider_id = ctx.store.add_provider("Dr. Smith").unwrap();
    ctx.store
        .add_availability(provider_id, window((9, 0), (17, 0)))
        .unwrap();
    let server = ctx.server();

    let response = server
        .post("/api/booking-request")
        .json(&booking_request("2025-07-27T11:00", "2025-07-27T10:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.bookings().unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_request_booking_rejects_missing_fields() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/booking-request")
        .json(&json!({ "startTime": "2025-07-27T10:00" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: Missing required fields: startTime, endTime, customerId"
    );
}

#[test(tokio::test)]
async fn test_request_booking_rejects_unparseable_time() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/booking-request")
        .json(&booking_request("tomorrow morning", "2025-07-27T10:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_back_to_back_bookings_both_succeed() {
    let ctx = TestContext::new();
    let provider_id = ctx.store.add_provider("Dr. Smith").unwrap();
    ctx.store
        .add_availability(provider_id, window((9, 0), (12, 0)))
        .unwrap();
    let server = ctx.server();

    for (start, end) in [("2025-07-27T09:00", "2025-07-27T10:00"), ("2025-07-27T10:00", "2025-07-27T11:00")] {
        server
            .post("/api/booking-request")
            .json(&booking_request(start, end))
            .await
            .assert_status(StatusCode::OK);
    }

    let bookings = ctx.store.bookings().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].window.start(), at(10, 0));
}

#[test(tokio::test)]
async fn test_request_booking_rejects_malformed_customer_id() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/booking-request")
        .json(&json!({
            "startTime": "2025-07-27T10:00",
            "endTime": "2025-07-27T11:00",
            "customerId": "not-a-uuid",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Validation error: Invalid request body"),
        "unexpected body: {body}"
    );
}

#[test(tokio::test)]
async fn test_request_booking_rejects_numeric_timestamp() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/booking-request")
        .json(&json!({
            "startTime": 1_753_610_400_000_i64,
            "endTime": "2025-07-27T11:00",
            "customerId": Uuid::new_v4(),
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert!(ctx.store.bookings().unwrap().is_empty());
}
