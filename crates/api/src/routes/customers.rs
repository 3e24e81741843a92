use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/customers", post(handlers::customer::register_customer))
        .route("/api/customers/:id", get(handlers::customer::get_customer))
}
