use std::collections::{HashMap, HashSet};

use chrono::Duration;
use uuid::Uuid;

use super::{conflict::filter_conflicts, slots::SlotGenerator};
use crate::{
    errors::ScheduleResult,
    models::{suggestion::Suggestion, window::TimeWindow},
    store::{AvailabilityFilter, BookingFilter, SchedulingStore},
};

/// Bounds on the alternative-slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    /// Stop scanning once this many free slots have been collected.
    pub scan_cap: usize,
    /// How many of the closest slots to return.
    pub limit: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            scan_cap: 20,
            limit: 5,
        }
    }
}

/// Collects free slots of `duration` across every provider and returns the
/// ones starting closest to `requested`.
///
/// Windows are scanned in ascending start order and the scan stops at
/// `limits.scan_cap` suggestions, so a closer slot later in the scan can be
/// missed. Ties in distance keep scan order.
pub async fn suggest(
    store: &dyn SchedulingStore,
    slots: &SlotGenerator,
    requested: TimeWindow,
    duration: Duration,
    limits: SuggestionLimits,
) -> ScheduleResult<Vec<Suggestion>> {
    let Some(earliest_end) = requested.start().checked_add_signed(duration) else {
        return Ok(Vec::new());
    };

    let listings = store
        .list_availability(&AvailabilityFilter::ending_at_or_after(earliest_end))
        .await?;
    if listings.is_empty() {
        return Ok(Vec::new());
    }

    let provider_ids: Vec<Uuid> = listings
        .iter()
        .map(|listing| listing.availability.provider_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let mut bookings_by_provider: HashMap<Uuid, Vec<TimeWindow>> = HashMap::new();
    for booking in store
        .list_bookings(&BookingFilter::for_providers(provider_ids))
        .await?
    {
        bookings_by_provider
            .entry(booking.provider_id)
            .or_default()
            .push(booking.window);
    }

    let mut suggestions = Vec::new();
    'scan: for listing in &listings {
        let window = listing.availability.window;
        if window.duration() < duration {
            continue;
        }

        let relevant: Vec<TimeWindow> = bookings_by_provider
            .get(&listing.availability.provider_id)
            .map(|bookings| {
                bookings
                    .iter()
                    .filter(|booking| booking.overlaps(&window))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        let candidates = slots.generate(window, duration);
        for slot in filter_conflicts(&candidates, &relevant) {
            suggestions.push(Suggestion::new(
                listing.availability.provider_id,
                listing.provider_name.clone(),
                slot,
                requested.start(),
            ));
            if suggestions.len() >= limits.scan_cap {
                break 'scan;
            }
        }
    }

    tracing::debug!(found = suggestions.len(), "collected alternative slots");

    // sort_by_key is stable, so equal distances keep scan order.
    suggestions.sort_by_key(|suggestion| suggestion.distance);
    suggestions.truncate(limits.limit);
    Ok(suggestions)
}
