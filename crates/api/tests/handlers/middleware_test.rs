use axum::http::StatusCode;
use chrono::Duration;
use rstest::rstest;
use slotsync_api::middleware::error_handling::{AppError, map_error};
use slotsync_core::{errors::ScheduleError, models::suggestion::Suggestion};
use uuid::Uuid;

use crate::test_utils::{at, window};

#[rstest]
#[case::invalid_window(ScheduleError::InvalidWindow("end before start".into()), StatusCode::BAD_REQUEST)]
#[case::validation(ScheduleError::Validation("Missing required fields".into()), StatusCode::BAD_REQUEST)]
#[case::not_found(ScheduleError::NotFound("Provider".into()), StatusCode::NOT_FOUND)]
#[case::conflict(ScheduleError::Conflict("slot taken".into()), StatusCode::CONFLICT)]
#[case::no_provider(ScheduleError::NoProviderAvailable, StatusCode::CONFLICT)]
#[case::no_exact_match(ScheduleError::NoExactMatch { suggestions: vec![] }, StatusCode::CONFLICT)]
#[case::storage(ScheduleError::StorageUnavailable(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: ScheduleError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = ScheduleError::Internal(Box::new(std::io::Error::other("Internal error")));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_storage_failure_body_is_generic() {
    let error = ScheduleError::StorageUnavailable(eyre::eyre!("password authentication failed"));

    let response = map_error(error);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_no_exact_match_body_carries_suggestions() {
    let provider_id = Uuid::new_v4();
    let suggestion = Suggestion::new(
        provider_id,
        "Dr. Smith".to_string(),
        window((11, 0), (12, 0)),
        at(10, 0),
    );
    let error = ScheduleError::NoExactMatch {
        suggestions: vec![suggestion],
    };

    let response = map_error(error);
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], slotsync_core::errors::NO_EXACT_MATCH_MESSAGE);
    assert_eq!(body["suggestions"][0]["providerId"], provider_id.to_string());
    assert_eq!(body["suggestions"][0]["providerName"], "Dr. Smith");
    assert_eq!(
        body["suggestions"][0]["timeDifference"],
        Duration::hours(1).num_milliseconds()
    );
}

#[tokio::test]
async fn test_eyre_report_maps_to_server_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
