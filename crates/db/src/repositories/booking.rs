use crate::models::{DbBooking, DbBookingDetails};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotsync_core::store::BookingFilter;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn create_booking(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    customer_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    status: &str,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, provider_id={}, customer_id={}",
        id, provider_id, customer_id
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, provider_id, customer_id, start_time, end_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, provider_id, customer_id, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(provider_id)
    .bind(customer_id)
    .bind(start_time)
    .bind(end_time)
    .bind(status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings(pool: &Pool<Postgres>, filter: &BookingFilter) -> Result<Vec<DbBooking>> {
    let mut query = QueryBuilder::<Postgres>::new(
        r#"
        SELECT id, provider_id, customer_id, start_time, end_time, status, created_at
        FROM bookings
        WHERE TRUE
        "#,
    );

    if let Some(provider_ids) = &filter.provider_ids {
        query
            .push(" AND provider_id = ANY(")
            .push_bind(provider_ids.clone())
            .push(")");
    }
    if let Some(window) = filter.overlapping {
        query
            .push(" AND start_time < ")
            .push_bind(window.end())
            .push(" AND end_time > ")
            .push_bind(window.start());
    }

    query.push(" ORDER BY start_time ASC");

    let bookings = query.build_query_as::<DbBooking>().fetch_all(pool).await?;

    Ok(bookings)
}

/// Bookings with both parties, for a customer or a provider.
pub async fn list_booking_details(
    pool: &Pool<Postgres>,
    customer_id: Option<Uuid>,
    provider_id: Option<Uuid>,
) -> Result<Vec<DbBookingDetails>> {
    let mut query = QueryBuilder::<Postgres>::new(
        r#"
        SELECT b.id, b.provider_id, p.name AS provider_name,
               b.customer_id, c.name AS customer_name, c.email AS customer_email,
               c.phone AS customer_phone, b.start_time, b.end_time, b.status
        FROM bookings b
        JOIN providers p ON p.id = b.provider_id
        JOIN customers c ON c.id = b.customer_id
        WHERE TRUE
        "#,
    );

    if let Some(customer_id) = customer_id {
        query.push(" AND b.customer_id = ").push_bind(customer_id);
    }
    if let Some(provider_id) = provider_id {
        query.push(" AND b.provider_id = ").push_bind(provider_id);
    }

    query.push(" ORDER BY b.start_time ASC");

    let bookings = query
        .build_query_as::<DbBookingDetails>()
        .fetch_all(pool)
        .await?;

    Ok(bookings)
}
