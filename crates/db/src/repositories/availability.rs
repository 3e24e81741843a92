use crate::models::{DbAvailability, DbAvailabilityListing};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotsync_core::store::AvailabilityFilter;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn create_availability(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbAvailability> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        INSERT INTO availabilities (id, provider_id, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, provider_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(provider_id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(availability)
}

pub async fn get_availability_by_provider_id(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
) -> Result<Vec<DbAvailability>> {
    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, provider_id, start_time, end_time, created_at
        FROM availabilities
        WHERE provider_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(availability)
}

/// Availability joined with provider names, ascending by start.
pub async fn list_availability(
    pool: &Pool<Postgres>,
    filter: &AvailabilityFilter,
) -> Result<Vec<DbAvailabilityListing>> {
    let mut query = QueryBuilder::<Postgres>::new(
        r#"
        SELECT a.id, a.provider_id, p.name AS provider_name, a.start_time, a.end_time
        FROM availabilities a
        JOIN providers p ON p.id = a.provider_id
        WHERE TRUE
        "#,
    );

    if let Some(provider_ids) = &filter.provider_ids {
        query
            .push(" AND a.provider_id = ANY(")
            .push_bind(provider_ids.clone())
            .push(")");
    }
    if let Some(window) = filter.containing {
        query
            .push(" AND a.start_time <= ")
            .push_bind(window.start())
            .push(" AND a.end_time >= ")
            .push_bind(window.end());
    }
    if let Some(instant) = filter.ends_at_or_after {
        query.push(" AND a.end_time >= ").push_bind(instant);
    }

    query.push(" ORDER BY a.start_time ASC, a.created_at ASC");

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(sql_limit(limit));
    }

    tracing::debug!("Listing availability: {:?}", filter);

    let listings = query
        .build_query_as::<DbAvailabilityListing>()
        .fetch_all(pool)
        .await?;

    Ok(listings)
}

/// `LIMIT` bind value; anything past `i64::MAX` is effectively unbounded.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
