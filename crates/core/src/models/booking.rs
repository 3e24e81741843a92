use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    participant::{CustomerSummary, ProviderSummary},
    suggestion::Suggestion,
    window::{TimeWindow, parse_window},
};
use crate::errors::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            other => Err(ScheduleError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

/// A confirmed reservation of a provider for a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    pub window: TimeWindow,
    pub status: BookingStatus,
}

/// What the engine hands to storage when a match succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    pub window: TimeWindow,
}

/// A validated request to book `window` for `customer_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub customer_id: Uuid,
    pub window: TimeWindow,
}

impl BookingRequest {
    pub fn new(customer_id: Uuid, window: TimeWindow) -> Self {
        Self { customer_id, window }
    }
}

impl TryFrom<BookingRequestPayload> for BookingRequest {
    type Error = ScheduleError;

    fn try_from(payload: BookingRequestPayload) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
        let (Some(start), Some(end), Some(customer_id)) = (
            present(payload.start_time),
            present(payload.end_time),
            payload.customer_id,
        )
        else {
            return Err(ScheduleError::Validation(
                "Missing required fields: startTime, endTime, customerId".to_string(),
            ));
        };

        Ok(Self {
            customer_id,
            window: parse_window(&start, &end)?,
        })
    }
}

/// Wire shape of `POST /api/booking-request`.
///
/// Every field is optional so missing fields surface as a validation error
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestPayload {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub provider: ProviderSummary,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Body returned when the exact request cannot be met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRejection {
    pub error: String,
    pub suggestions: Vec<Suggestion>,
}

/// A booking joined with both parties, as booking listings return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: Uuid,
    pub provider: ProviderSummary,
    pub customer: CustomerSummary,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub customer_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
}
