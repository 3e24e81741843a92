/// Provider availability windows
pub mod availability;
/// Booking requests and booking listings
pub mod booking;
/// Customer registration and lookup
pub mod customer;
/// Provider registration and lookup
pub mod provider;

use slotsync_core::{errors::ScheduleError, models::participant::RegisterRequest};

/// Pulls the required name and email out of a registration payload.
pub(crate) fn registration_identity(payload: &RegisterRequest) -> Result<(&str, &str), ScheduleError> {
    fn present(field: &Option<String>) -> Option<&str> {
        field.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    match (present(&payload.name), present(&payload.email)) {
        (Some(name), Some(email)) => Ok((name, email)),
        _ => Err(ScheduleError::Validation(
            "Missing required fields: name and email".to_string(),
        )),
    }
}
