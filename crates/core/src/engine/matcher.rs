use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::{contains, overlaps};
use crate::{
    errors::ScheduleResult,
    models::window::TimeWindow,
    store::{AvailabilityFilter, BookingFilter, SchedulingStore},
};

/// A provider whose availability covers the request and who has no booking in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableProvider {
    pub provider_id: Uuid,
    pub provider_name: String,
    pub availability: TimeWindow,
}

/// Finds providers able to take `requested` exactly as asked.
///
/// At most `fetch_limit` availability rows are considered, so a qualifying
/// provider past the cap is not seen. Results keep storage order (ascending
/// availability start); the caller books the first one.
pub async fn find_available_providers(
    store: &dyn SchedulingStore,
    requested: TimeWindow,
    fetch_limit: usize,
) -> ScheduleResult<Vec<AvailableProvider>> {
    let listings = store
        .list_availability(&AvailabilityFilter::containing(requested).with_limit(fetch_limit))
        .await?;

    let listings: Vec<_> = listings
        .into_iter()
        .filter(|listing| contains(&listing.availability.window, &requested))
        .collect();

    if listings.is_empty() {
        return Ok(Vec::new());
    }

    let provider_ids: Vec<Uuid> = listings
        .iter()
        .map(|listing| listing.availability.provider_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let busy: HashSet<Uuid> = store
        .list_bookings(&BookingFilter::for_providers(provider_ids).overlapping(requested))
        .await?
        .into_iter()
        .filter(|booking| overlaps(&booking.window, &requested))
        .map(|booking| booking.provider_id)
        .collect();

    tracing::debug!(
        candidates = listings.len(),
        busy = busy.len(),
        "matched availability against bookings"
    );

    Ok(listings
        .into_iter()
        .filter(|listing| !busy.contains(&listing.availability.provider_id))
        .map(|listing| AvailableProvider {
            provider_id: listing.availability.provider_id,
            provider_name: listing.provider_name,
            availability: listing.availability.window,
        })
        .collect())
}
