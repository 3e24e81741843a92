//! # Booking Engine
//!
//! A booking request is handled in two phases:
//!
//! 1. **Exact match**: look for a provider whose availability contains the
//!    requested window and who has no booking overlapping it. The first such
//!    provider is booked.
//! 2. **Suggestions**: when nobody qualifies, scan all availability for free
//!    slots of the same length and return the ones starting closest to the
//!    requested start.
//!
//! The engine keeps no per-request state. Reads are snapshots taken through
//! the [`SchedulingStore`]; the only write is the final booking, and the store
//! is responsible for rejecting it if another request got there first.

pub mod conflict;
pub mod interval;
pub mod matcher;
pub mod ranker;
pub mod slots;

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        booking::{BookingConfirmation, BookingRequest, NewBooking},
        participant::ProviderSummary,
        suggestion::Suggestion,
        window::TimeWindow,
    },
    store::SchedulingStore,
};
use matcher::AvailableProvider;
use ranker::SuggestionLimits;
use slots::{DEFAULT_SLOT_CACHE_CAPACITY, DEFAULT_SLOT_STEP_MINUTES, SlotGenerator};

/// Tuning knobs for matching and suggestion search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid spacing and stride for candidate slots.
    pub slot_step: Duration,
    /// Entries held by the slot cache before it is cleared. Zero disables it.
    pub slot_cache_capacity: usize,
    /// Availability rows fetched for the exact-match phase.
    pub match_fetch_limit: usize,
    pub suggestion_scan_cap: usize,
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let limits = SuggestionLimits::default();
        Self {
            slot_step: Duration::minutes(DEFAULT_SLOT_STEP_MINUTES),
            slot_cache_capacity: DEFAULT_SLOT_CACHE_CAPACITY,
            match_fetch_limit: 10,
            suggestion_scan_cap: limits.scan_cap,
            suggestion_limit: limits.limit,
        }
    }
}

impl EngineConfig {
    pub fn suggestion_limits(&self) -> SuggestionLimits {
        SuggestionLimits {
            scan_cap: self.suggestion_scan_cap,
            limit: self.suggestion_limit,
        }
    }
}

pub struct BookingEngine {
    store: Arc<dyn SchedulingStore>,
    slots: SlotGenerator,
    config: EngineConfig,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn SchedulingStore>, config: EngineConfig) -> Self {
        Self {
            store,
            slots: SlotGenerator::new(config.slot_step, config.slot_cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn slots(&self) -> &SlotGenerator {
        &self.slots
    }

    pub async fn find_available_providers(
        &self,
        requested: TimeWindow,
    ) -> ScheduleResult<Vec<AvailableProvider>> {
        matcher::find_available_providers(self.store.as_ref(), requested, self.config.match_fetch_limit)
            .await
    }

    /// Closest free slots with the same length as `requested`.
    pub async fn suggest(&self, requested: TimeWindow) -> ScheduleResult<Vec<Suggestion>> {
        self.suggest_with_duration(requested, requested.duration()).await
    }

    pub async fn suggest_with_duration(
        &self,
        requested: TimeWindow,
        duration: Duration,
    ) -> ScheduleResult<Vec<Suggestion>> {
        ranker::suggest(
            self.store.as_ref(),
            &self.slots,
            requested,
            duration,
            self.config.suggestion_limits(),
        )
        .await
    }

    /// Books the first provider able to take the request as asked.
    ///
    /// # Errors
    ///
    /// * `NoExactMatch` - nobody is free, but alternative slots exist
    /// * `NoProviderAvailable` - nobody is free and there are no alternatives
    /// * `Conflict` - storage refused the booking because a concurrent request
    ///   took the slot first; nothing is retried
    /// * `StorageUnavailable` - propagated from the store
    pub async fn request_booking(&self, request: &BookingRequest) -> ScheduleResult<BookingConfirmation> {
        let requested = request.window;
        debug!(customer_id = %request.customer_id, %requested, "booking request");

        let available = self.find_available_providers(requested).await?;
        let Some(selected) = available.into_iter().next() else {
            let suggestions = self.suggest(requested).await?;
            debug!(count = suggestions.len(), "no exact match");
            return Err(if suggestions.is_empty() {
                ScheduleError::NoProviderAvailable
            } else {
                ScheduleError::NoExactMatch { suggestions }
            });
        };

        let booking = self
            .store
            .create_booking(NewBooking {
                provider_id: selected.provider_id,
                customer_id: request.customer_id,
                window: requested,
            })
            .await
            .inspect_err(|err| {
                if let ScheduleError::Conflict(reason) = err {
                    warn!(provider_id = %selected.provider_id, %reason, "booking lost a race");
                }
            })?;

        info!(
            booking_id = %booking.id,
            provider_id = %booking.provider_id,
            "booking confirmed"
        );

        Ok(BookingConfirmation {
            booking_id: booking.id,
            provider: ProviderSummary {
                id: selected.provider_id,
                name: selected.provider_name,
            },
            start_time: booking.window.start(),
            end_time: booking.window.end(),
            status: booking.status,
        })
    }
}
