use axum::{
    Json,
    extract::{Path, State},
};
use slotsync_core::{
    errors::ScheduleError,
    models::participant::{Provider, RegisterRequest, RegisterResponse},
};
use slotsync_db::{models::DbProvider, store::is_unique_violation};
use std::sync::Arc;
use uuid::Uuid;

use super::registration_identity;
use crate::{
    ApiState,
    middleware::error_handling::{AppError, AppJson},
};

fn logged_in(existing: DbProvider) -> RegisterResponse {
    RegisterResponse {
        id: existing.id,
        name: existing.name,
        email: existing.email,
        phone: existing.phone,
        message: "Provider logged in successfully".to_string(),
    }
}

/// Registers a provider, or logs in the provider that already owns the email.
#[axum::debug_handler]
pub async fn register_provider(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let (name, email) = registration_identity(&payload)?;

    if let Some(existing) =
        slotsync_db::repositories::provider::get_provider_by_email(&state.db_pool, email).await?
    {
        return Ok(Json(logged_in(existing)));
    }

    let provider = match slotsync_db::repositories::provider::create_provider(
        &state.db_pool,
        name,
        email,
        payload.phone.as_deref(),
    )
    .await
    {
        Ok(provider) => provider,
        // A concurrent registration claimed the email between lookup and insert
        Err(err) if is_unique_violation(&err) => {
            let existing =
                slotsync_db::repositories::provider::get_provider_by_email(&state.db_pool, email)
                    .await?
                    .ok_or_else(|| AppError::from(err))?;
            return Ok(Json(logged_in(existing)));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Registered provider {}", provider.id);

    Ok(Json(RegisterResponse {
        id: provider.id,
        name: provider.name,
        email: provider.email,
        phone: provider.phone,
        message: "Provider registered successfully".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Provider>>, AppError> {
    let providers = slotsync_db::repositories::provider::list_providers(&state.db_pool).await?;

    Ok(Json(providers.into_iter().map(Provider::from).collect()))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Provider>, AppError> {
    let provider = slotsync_db::repositories::provider::get_provider_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| ScheduleError::NotFound(format!("Provider with ID {} not found", id)))?;

    Ok(Json(provider.into()))
}
