//! # Booking Handlers
//!
//! `POST /api/booking-request` is the entry point into the booking engine.
//! A free provider is booked straight away; otherwise the response is a 409
//! carrying the closest alternative slots, and the client re-requests one of
//! them explicitly.

use axum::{
    Json,
    extract::{Query, State},
};
use slotsync_core::{
    errors::ScheduleError,
    models::booking::{
        BookingConfirmation, BookingDetails, BookingListQuery, BookingRequest,
        BookingRequestPayload,
    },
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::error_handling::{AppError, AppJson},
};

/// Books the requested window with the first free provider
///
/// # Endpoint
///
/// ```text
/// POST /api/booking-request
/// {"startTime": "2025-07-27T10:00", "endTime": "2025-07-27T11:00", "customerId": "..."}
/// ```
///
/// # Errors
///
/// * `Validation` / `InvalidWindow` (400) - rejected before any lookup
/// * `NoExactMatch` (409) - nobody is free; body carries suggestions
/// * `NoProviderAvailable` (409) - nobody is free and nothing else is open
/// * `Conflict` (409) - a concurrent request took the slot; resubmit
#[axum::debug_handler]
pub async fn request_booking(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<BookingRequestPayload>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let request = BookingRequest::try_from(payload)?;

    let confirmation = state.engine.request_booking(&request).await?;

    Ok(Json(confirmation))
}

/// Lists bookings for a customer, or for a provider when no customer is given
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingDetails>>, AppError> {
    let (customer_id, provider_id) = match (query.customer_id, query.provider_id) {
        (Some(customer_id), _) => (Some(customer_id), None),
        (None, Some(provider_id)) => (None, Some(provider_id)),
        (None, None) => {
            return Err(AppError(ScheduleError::Validation(
                "Missing customerId or providerId parameter".to_string(),
            )));
        }
    };

    let bookings = slotsync_db::repositories::booking::list_booking_details(
        &state.db_pool,
        customer_id,
        provider_id,
    )
    .await?
    .into_iter()
    .map(BookingDetails::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(bookings))
}
