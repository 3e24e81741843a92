use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use slotsync_core::{
    errors::ScheduleError,
    models::{
        booking::{BookingConfirmation, BookingStatus},
        participant::ProviderSummary,
        suggestion::Suggestion,
        window::{TimeWindow, parse_instant, parse_window},
    },
};
use uuid::Uuid;

#[rstest]
#[case("2025-07-27T10:00:00Z")]
#[case("2025-07-27T10:00:00.000Z")]
#[case("2025-07-27T12:00:00+02:00")]
#[case("2025-07-27T10:00")]
#[case("2025-07-27T10:00:00")]
fn test_parse_instant_reads_utc(#[case] input: &str) {
    let expected = Utc.with_ymd_and_hms(2025, 7, 27, 10, 0, 0).unwrap();
    assert_eq!(parse_instant(input).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("tomorrow")]
#[case("2025-13-01T10:00")]
fn test_parse_instant_rejects_garbage(#[case] input: &str) {
    assert!(matches!(parse_instant(input), Err(ScheduleError::InvalidWindow(_))));
}

#[test]
fn test_parse_window_checks_order() {
    assert!(parse_window("2025-07-27T10:00", "2025-07-27T11:00").is_ok());
    assert!(matches!(
        parse_window("2025-07-27T10:00", "2025-07-27T10:00"),
        Err(ScheduleError::InvalidWindow(_))
    ));
}

#[test]
fn test_window_deserialization_validates() {
    let ok: TimeWindow = from_str(r#"{"startTime":"2025-07-27T10:00:00Z","endTime":"2025-07-27T11:00:00Z"}"#).unwrap();
    assert_eq!(ok.duration(), Duration::hours(1));

    let bad = from_str::<TimeWindow>(r#"{"startTime":"2025-07-27T11:00:00Z","endTime":"2025-07-27T10:00:00Z"}"#);
    assert!(bad.is_err());
}

#[test]
fn test_suggestion_wire_format() {
    let provider_id = Uuid::new_v4();
    let requested = Utc.with_ymd_and_hms(2025, 7, 27, 10, 0, 0).unwrap();
    let slot = TimeWindow::new(requested - Duration::hours(1), requested).unwrap();
    let suggestion = Suggestion::new(provider_id, "Ada".to_string(), slot, requested);

    assert_eq!(suggestion.distance, Duration::hours(1));
    assert_eq!(
        to_value(&suggestion).unwrap(),
        json!({
            "providerId": provider_id,
            "providerName": "Ada",
            "startTime": "2025-07-27T09:00:00Z",
            "endTime": "2025-07-27T10:00:00Z",
            "timeDifference": 3_600_000,
        })
    );

    let back: Suggestion = serde_json::from_value(to_value(&suggestion).unwrap()).unwrap();
    assert_eq!(back, suggestion);
}

#[test]
fn test_confirmation_wire_format() {
    let booking_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();
    let start = Utc.with_ymd_and_hms(2025, 7, 27, 10, 0, 0).unwrap();
    let confirmation = BookingConfirmation {
        booking_id,
        provider: ProviderSummary {
            id: provider_id,
            name: "Ada".to_string(),
        },
        start_time: start,
        end_time: start + Duration::hours(1),
        status: BookingStatus::Confirmed,
    };

    let value = to_value(&confirmation).unwrap();
    assert_eq!(value["bookingId"], json!(booking_id));
    assert_eq!(value["provider"]["name"], json!("Ada"));
    assert_eq!(value["status"], json!("confirmed"));
}

#[test]
fn test_booking_status_round_trip_through_text() {
    assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
    assert_eq!(BookingStatus::Confirmed.to_string(), "confirmed");
    assert!("cancelled".parse::<BookingStatus>().is_err());
}
