use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::TimeWindow;

/// A window during which a provider declares itself bookable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub window: TimeWindow,
}

/// An availability row joined with its provider's display name, as storage
/// listings return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAvailability {
    pub availability: Availability,
    pub provider_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRequest {
    pub provider_id: Option<Uuid>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub provider_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&ProviderAvailability> for AvailabilityResponse {
    fn from(listing: &ProviderAvailability) -> Self {
        Self {
            id: listing.availability.id,
            provider_id: listing.availability.provider_id,
            provider_name: Some(listing.provider_name.clone()),
            start_time: listing.availability.window.start(),
            end_time: listing.availability.window.end(),
        }
    }
}

impl From<&Availability> for AvailabilityResponse {
    fn from(availability: &Availability) -> Self {
        Self {
            id: availability.id,
            provider_id: availability.provider_id,
            provider_name: None,
            start_time: availability.window.start(),
            end_time: availability.window.end(),
        }
    }
}
