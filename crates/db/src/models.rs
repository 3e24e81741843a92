use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotsync_core::{
    errors::ScheduleError,
    models::{
        availability::{Availability, ProviderAvailability},
        booking::{Booking, BookingDetails},
        participant::{Customer, CustomerSummary, Provider, ProviderSummary},
        window::TimeWindow,
    },
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProvider {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Availability joined with the provider's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityListing {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Booking joined with provider and customer contact details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingDetails {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider_name: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl From<DbProvider> for Provider {
    fn from(row: DbProvider) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

impl From<DbCustomer> for Customer {
    fn from(row: DbCustomer) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

// Rows are range-checked by the schema, but the conversions still go through
// the validating constructor rather than trusting the database.

impl TryFrom<DbAvailability> for Availability {
    type Error = ScheduleError;

    fn try_from(row: DbAvailability) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            provider_id: row.provider_id,
            window: TimeWindow::new(row.start_time, row.end_time)?,
        })
    }
}

impl TryFrom<DbAvailabilityListing> for ProviderAvailability {
    type Error = ScheduleError;

    fn try_from(row: DbAvailabilityListing) -> Result<Self, Self::Error> {
        Ok(Self {
            availability: Availability {
                id: row.id,
                provider_id: row.provider_id,
                window: TimeWindow::new(row.start_time, row.end_time)?,
            },
            provider_name: row.provider_name,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = ScheduleError;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            provider_id: row.provider_id,
            customer_id: row.customer_id,
            window: TimeWindow::new(row.start_time, row.end_time)?,
            status: row.status.parse()?,
        })
    }
}

impl TryFrom<DbBookingDetails> for BookingDetails {
    type Error = ScheduleError;

    fn try_from(row: DbBookingDetails) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            provider: ProviderSummary {
                id: row.provider_id,
                name: row.provider_name,
            },
            customer: CustomerSummary {
                id: row.customer_id,
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse()?,
        })
    }
}
