//! # Error Handling Middleware
//!
//! Maps `ScheduleError` onto HTTP status codes and JSON bodies so every
//! handler reports failures the same way.
//!
//! | error | status |
//! |---|---|
//! | `InvalidWindow`, `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `Conflict`, `NoProviderAvailable`, `NoExactMatch` | 409 |
//! | `StorageUnavailable`, `Internal` | 500 |
//!
//! The body is `{"error": message}`. The two "nobody is free" errors add a
//! `suggestions` array (possibly empty) so the client can offer alternatives.
//! Server-side failures are logged and answered with a generic message.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotsync_core::{errors::ScheduleError, models::booking::BookingRejection};

/// Application error wrapper that provides HTTP status code mapping
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScheduleError::InvalidWindow(_) | ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Conflict(_)
            | ScheduleError::NoProviderAvailable
            | ScheduleError::NoExactMatch { .. } => StatusCode::CONFLICT,
            ScheduleError::StorageUnavailable(_) | ScheduleError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self.0 {
            ScheduleError::NoProviderAvailable | ScheduleError::NoExactMatch { .. } => {
                let rejection = BookingRejection {
                    error: self.0.to_string(),
                    suggestions: self.0.suggestions().to_vec(),
                };
                return (status, Json(rejection)).into_response();
            }
            ScheduleError::StorageUnavailable(_) | ScheduleError::Internal(_) => {
                tracing::error!("Request failed: {:?}", self.0);
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on `ScheduleResult` inside handlers
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as storage errors
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::StorageUnavailable(err))
    }
}

/// Malformed or mistyped request bodies are invalid input
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ScheduleError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// `Json` extractor whose rejections go through `AppError`, so a body that
/// does not deserialize gets the same 400 `{"error": ...}` as any other bad input.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Maps a ScheduleError to an HTTP response
pub fn map_error(err: ScheduleError) -> Response {
    AppError(err).into_response()
}
