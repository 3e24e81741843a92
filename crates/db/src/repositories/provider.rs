use crate::models::DbProvider;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_provider(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<DbProvider> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating provider: id={}, email={}", id, email);

    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        INSERT INTO providers (id, name, email, phone, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, email, phone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(provider)
}

pub async fn get_provider_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProvider>> {
    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, name, email, phone, created_at
        FROM providers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn get_provider_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbProvider>> {
    let provider = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, name, email, phone, created_at
        FROM providers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn list_providers(pool: &Pool<Postgres>) -> Result<Vec<DbProvider>> {
    let providers = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, name, email, phone, created_at
        FROM providers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}
