//! # Availability Handlers
//!
//! Providers publish the windows they can be booked in. Windows are stored as
//! given; the booking engine decides later which slots inside them are free.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use slotsync_core::{
    errors::ScheduleError,
    models::{
        availability::{Availability, AvailabilityResponse, CreateAvailabilityRequest, ProviderAvailability},
        window::parse_window,
    },
    store::AvailabilityFilter,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::error_handling::{AppError, AppJson},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuery {
    pub provider_id: Option<Uuid>,
}

/// Creates an availability window for a provider
///
/// # Errors
///
/// * `Validation` - a field is missing
/// * `InvalidWindow` - a timestamp is malformed or the end is not after the start
/// * `NotFound` - the provider does not exist
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (Some(provider_id), Some(start), Some(end)) =
        (payload.provider_id, payload.start_time, payload.end_time)
    else {
        return Err(AppError(ScheduleError::Validation(
            "Missing required fields: startTime, endTime, providerId".to_string(),
        )));
    };

    let window = parse_window(&start, &end)?;

    slotsync_db::repositories::provider::get_provider_by_id(&state.db_pool, provider_id)
        .await?
        .ok_or_else(|| {
            ScheduleError::NotFound(format!("Provider with ID {} not found", provider_id))
        })?;

    let row = slotsync_db::repositories::availability::create_availability(
        &state.db_pool,
        provider_id,
        window.start(),
        window.end(),
    )
    .await?;

    let availability = Availability::try_from(row)?;
    Ok(Json(AvailabilityResponse::from(&availability)))
}

/// Lists every availability window with its provider's name, ascending by start
#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AvailabilityResponse>>, AppError> {
    let listings = slotsync_db::repositories::availability::list_availability(
        &state.db_pool,
        &AvailabilityFilter::default(),
    )
    .await?
    .into_iter()
    .map(ProviderAvailability::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(listings.iter().map(AvailabilityResponse::from).collect()))
}

/// Lists one provider's availability windows
#[axum::debug_handler]
pub async fn list_provider_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<Vec<AvailabilityResponse>>, AppError> {
    let provider_id = query.provider_id.ok_or_else(|| {
        ScheduleError::Validation("Missing providerId parameter".to_string())
    })?;

    let windows = slotsync_db::repositories::availability::get_availability_by_provider_id(
        &state.db_pool,
        provider_id,
    )
    .await?
    .into_iter()
    .map(Availability::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(windows.iter().map(AvailabilityResponse::from).collect()))
}
