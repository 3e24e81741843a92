use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::TimeWindow;

/// An alternative slot offered when the requested window cannot be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub provider_id: Uuid,
    pub provider_name: String,
    #[serde(flatten)]
    pub window: TimeWindow,
    /// `|window.start - requested start|`, in milliseconds on the wire.
    #[serde(rename = "timeDifference", with = "duration_millis")]
    pub distance: Duration,
}

impl Suggestion {
    pub fn new(provider_id: Uuid, provider_name: String, window: TimeWindow, requested_start: DateTime<Utc>) -> Self {
        let offset = window.start() - requested_start;
        Self {
            provider_id,
            provider_name,
            window,
            distance: if offset < Duration::zero() { -offset } else { offset },
        }
    }
}

mod duration_millis {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        i64::deserialize(deserializer).map(Duration::milliseconds)
    }
}
