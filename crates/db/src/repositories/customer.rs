use crate::models::DbCustomer;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_customer(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<DbCustomer> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating customer: id={}, email={}", id, email);

    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        INSERT INTO customers (id, name, email, phone, created_at)
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

    Ok(customer)
}

pub async fn get_customer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, name, email, phone, created_at
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn get_customer_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, name, email, phone, created_at
        FROM customers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}
