use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use eyre::eyre;
use uuid::Uuid;

use super::{AvailabilityFilter, BookingFilter, SchedulingStore};
use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        availability::{Availability, ProviderAvailability},
        booking::{Booking, BookingStatus, NewBooking},
        window::TimeWindow,
    },
};

#[derive(Debug, Default)]
struct MemoryState {
    providers: HashMap<Uuid, String>,
    availability: Vec<Availability>,
    bookings: Vec<Booking>,
}

/// A `SchedulingStore` held entirely in process memory.
///
/// Booking creation checks for overlaps under the write lock, so it gives the
/// same double-booking guarantee as the database exclusion constraint.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ScheduleResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| ScheduleError::StorageUnavailable(eyre!("in-memory store lock poisoned")))
    }

    fn write(&self) -> ScheduleResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| ScheduleError::StorageUnavailable(eyre!("in-memory store lock poisoned")))
    }

    pub fn add_provider(&self, name: impl Into<String>) -> ScheduleResult<Uuid> {
        let id = Uuid::new_v4();
        self.write()?.providers.insert(id, name.into());
        Ok(id)
    }

    pub fn add_availability(&self, provider_id: Uuid, window: TimeWindow) -> ScheduleResult<Availability> {
        let mut state = self.write()?;
        if !state.providers.contains_key(&provider_id) {
            return Err(ScheduleError::NotFound(format!(
                "Provider with ID {} not found",
                provider_id
            )));
        }

        let availability = Availability {
            id: Uuid::new_v4(),
            provider_id,
            window,
        };
        state.availability.push(availability.clone());
        Ok(availability)
    }

    /// Seeds a booking directly, with the same overlap check as `create_booking`.
    pub fn add_booking(&self, provider_id: Uuid, customer_id: Uuid, window: TimeWindow) -> ScheduleResult<Booking> {
        self.insert(NewBooking {
            provider_id,
            customer_id,
            window,
        })
    }

    pub fn bookings(&self) -> ScheduleResult<Vec<Booking>> {
        Ok(self.read()?.bookings.clone())
    }

    fn insert(&self, new: NewBooking) -> ScheduleResult<Booking> {
        let mut state = self.write()?;
        let clash = state
            .bookings
            .iter()
            .any(|b| b.provider_id == new.provider_id && b.window.overlaps(&new.window));
        if clash {
            return Err(ScheduleError::Conflict(format!(
                "Provider {} already has a booking overlapping {}",
                new.provider_id, new.window
            )));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            provider_id: new.provider_id,
            customer_id: new.customer_id,
            window: new.window,
            status: BookingStatus::Confirmed,
        };
        state.bookings.push(booking.clone());
        Ok(booking)
    }
}

#[async_trait]
impl SchedulingStore for InMemoryStore {
    async fn list_availability(
        &self,
        filter: &AvailabilityFilter,
    ) -> ScheduleResult<Vec<ProviderAvailability>> {
        let state = self.read()?;
        let mut listings: Vec<ProviderAvailability> = state
            .availability
            .iter()
            .map(|availability| ProviderAvailability {
                availability: availability.clone(),
                provider_name: state
                    .providers
                    .get(&availability.provider_id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .filter(|listing| filter.matches(listing))
            .collect();

        listings.sort_by_key(|listing| listing.availability.window.start());
        if let Some(limit) = filter.limit {
            listings.truncate(limit);
        }
        Ok(listings)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> ScheduleResult<Vec<Booking>> {
        let state = self.read()?;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.window.start());
        Ok(bookings)
    }

    async fn create_booking(&self, booking: NewBooking) -> ScheduleResult<Booking> {
        self.insert(booking)
    }
}
