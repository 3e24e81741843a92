use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            get(handlers::availability::list_availability)
                .post(handlers::availability::create_availability),
        )
        .route(
            "/api/availability/me",
            get(handlers::availability::list_provider_availability),
        )
}
