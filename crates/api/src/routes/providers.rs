use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/providers",
            get(handlers::provider::list_providers).post(handlers::provider::register_provider),
        )
        .route("/api/providers/:id", get(handlers::provider::get_provider))
}
