//! # Storage Collaborator
//!
//! The engine never talks to a database directly. Everything it reads and the
//! one thing it writes go through [`SchedulingStore`], so the same matching
//! logic runs over PostgreSQL in production and over [`memory::InMemoryStore`]
//! in tests.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::ScheduleResult,
    models::{
        availability::ProviderAvailability,
        booking::{Booking, NewBooking},
        window::TimeWindow,
    },
};

/// Narrows an availability listing. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityFilter {
    pub provider_ids: Option<Vec<Uuid>>,
    /// Keep only windows that fully contain this one.
    pub containing: Option<TimeWindow>,
    /// Keep only windows whose end is at or after this instant.
    pub ends_at_or_after: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl AvailabilityFilter {
    pub fn containing(window: TimeWindow) -> Self {
        Self {
            containing: Some(window),
            ..Self::default()
        }
    }

    pub fn ending_at_or_after(instant: DateTime<Utc>) -> Self {
        Self {
            ends_at_or_after: Some(instant),
            ..Self::default()
        }
    }

    pub fn for_providers(provider_ids: Vec<Uuid>) -> Self {
        Self {
            provider_ids: Some(provider_ids),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, listing: &ProviderAvailability) -> bool {
        let availability = &listing.availability;
        self.provider_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&availability.provider_id))
            && self
                .containing
                .is_none_or(|inner| availability.window.contains(&inner))
            && self
                .ends_at_or_after
                .is_none_or(|instant| availability.window.end() >= instant)
    }
}

/// Narrows a booking listing. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub provider_ids: Option<Vec<Uuid>>,
    /// Keep only bookings overlapping this window.
    pub overlapping: Option<TimeWindow>,
}

impl BookingFilter {
    pub fn for_providers(provider_ids: Vec<Uuid>) -> Self {
        Self {
            provider_ids: Some(provider_ids),
            overlapping: None,
        }
    }

    pub fn overlapping(mut self, window: TimeWindow) -> Self {
        self.overlapping = Some(window);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.provider_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&booking.provider_id))
            && self
                .overlapping
                .is_none_or(|window| booking.window.overlaps(&window))
    }
}

/// Read and write operations the booking engine needs from persistence.
///
/// Implementations must return listings ordered ascending by window start, and
/// `create_booking` must refuse (with `ScheduleError::Conflict`) a booking
/// that overlaps an existing one for the same provider. That refusal is what
/// protects concurrent requests from double booking; the engine itself holds
/// no locks.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    async fn list_availability(
        &self,
        filter: &AvailabilityFilter,
    ) -> ScheduleResult<Vec<ProviderAvailability>>;

    async fn list_bookings(&self, filter: &BookingFilter) -> ScheduleResult<Vec<Booking>>;

    async fn create_booking(&self, booking: NewBooking) -> ScheduleResult<Booking>;
}
