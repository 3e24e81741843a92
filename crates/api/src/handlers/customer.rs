use axum::{
    Json,
    extract::{Path, State},
};
use slotsync_core::{
    errors::ScheduleError,
    models::participant::{Customer, RegisterRequest, RegisterResponse},
};
use slotsync_db::{models::DbCustomer, store::is_unique_violation};
use std::sync::Arc;
use uuid::Uuid;

use super::registration_identity;
use crate::{
    ApiState,
    middleware::error_handling::{AppError, AppJson},
};

fn logged_in(existing: DbCustomer) -> RegisterResponse {
    RegisterResponse {
        id: existing.id,
        name: existing.name,
        email: existing.email,
        phone: existing.phone,
        message: "Customer logged in successfully".to_string(),
    }
}

/// Registers a customer, or logs in the customer that already owns the email.
#[axum::debug_handler]
pub async fn register_customer(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let (name, email) = registration_identity(&payload)?;

    if let Some(existing) =
        slotsync_db::repositories::customer::get_customer_by_email(&state.db_pool, email).await?
    {
        return Ok(Json(logged_in(existing)));
    }

    let customer = match slotsync_db::repositories::customer::create_customer(
        &state.db_pool,
        name,
        email,
        payload.phone.as_deref(),
    )
    .await
    {
        Ok(customer) => customer,
        // A concurrent registration claimed the email between lookup and insert
        Err(err) if is_unique_violation(&err) => {
            let existing =
                slotsync_db::repositories::customer::get_customer_by_email(&state.db_pool, email)
                    .await?
                    .ok_or_else(|| AppError::from(err))?;
            return Ok(Json(logged_in(existing)));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(RegisterResponse {
        id: customer.id,
        name: customer.name,
        email: customer.email,
        phone: customer.phone,
        message: "Customer registered successfully".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let customer = slotsync_db::repositories::customer::get_customer_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| ScheduleError::NotFound(format!("Customer with ID {} not found", id)))?;

    Ok(Json(customer.into()))
}
