//! # SlotSync API
//!
//! The API crate provides the web server for the SlotSync booking service.
//! It exposes provider and customer registration, availability management,
//! booking listings and the booking-request endpoint that drives the engine.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! CRUD handlers talk to the repositories in `slotsync-db` directly; booking
//! requests go through the shared `BookingEngine`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Error mapping shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::{Result, WrapErr};
use slotsync_core::engine::BookingEngine;
use slotsync_db::store::PgStore;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for CRUD handlers
    pub db_pool: PgPool,
    /// Matching engine, built once so its slot cache is shared across requests
    pub engine: BookingEngine,
}

impl ApiState {
    /// State whose engine reads and writes through the same pool.
    pub fn new(db_pool: PgPool, engine_config: slotsync_core::engine::EngineConfig) -> Self {
        let store = Arc::new(PgStore::new(db_pool.clone()));
        Self {
            db_pool,
            engine: BookingEngine::new(store, engine_config),
        }
    }
}

/// Builds the application router with all routes attached
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration endpoints
        .merge(routes::providers::routes())
        .merge(routes::customers::routes())
        // Availability management endpoints
        .merge(routes::availability::routes())
        // Booking endpoints
        .merge(routes::bookings::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = slotsync_api::config::ApiConfig::from_env()?;
/// let db_pool = slotsync_db::create_pool(&config.database_url).await?;
/// slotsync_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, config.engine));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS entry")?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware, answering 408 when a request overruns
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                config.request_timeout,
            )))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
