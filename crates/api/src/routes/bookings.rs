use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", get(handlers::booking::list_bookings))
        .route(
            "/api/booking-request",
            post(handlers::booking::request_booking),
        )
}
