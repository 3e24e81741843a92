//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SlotSync API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//!
//! Booking engine tuning:
//!
//! - `SLOT_STEP_MINUTES`: Grid and stride for candidate slots (default: 30)
//! - `SLOT_CACHE_CAPACITY`: Slot cache entries before it is cleared, 0 disables (default: 1000)
//! - `MATCH_FETCH_LIMIT`: Availability rows considered for an exact match (default: 10)
//! - `SUGGESTION_SCAN_CAP`: Free slots collected before the search stops (default: 20)
//! - `SUGGESTION_LIMIT`: Suggestions returned (default: 5)

use chrono::Duration;
use eyre::{Result, WrapErr, eyre};
use slotsync_core::engine::EngineConfig;
use std::{env, str::FromStr};
use tracing::Level;

/// Configuration for the SlotSync API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotsync_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Matching and suggestion tuning
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - An engine tuning value is set but is not a non-negative integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Engine settings
        let defaults = EngineConfig::default();
        let step_minutes: i64 = parse_or(&lookup, "SLOT_STEP_MINUTES", defaults.slot_step.num_minutes())?;
        if step_minutes <= 0 {
            return Err(eyre!("SLOT_STEP_MINUTES must be positive"));
        }
        let engine = EngineConfig {
            slot_step: Duration::minutes(step_minutes),
            slot_cache_capacity: parse_or(&lookup, "SLOT_CACHE_CAPACITY", defaults.slot_cache_capacity)?,
            match_fetch_limit: parse_or(&lookup, "MATCH_FETCH_LIMIT", defaults.match_fetch_limit)?,
            suggestion_scan_cap: parse_or(&lookup, "SUGGESTION_SCAN_CAP", defaults.suggestion_scan_cap)?,
            suggestion_limit: parse_or(&lookup, "SUGGESTION_LIMIT", defaults.suggestion_limit)?,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            engine,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| eyre!("Invalid {} value: {}", key, value)),
        None => Ok(default),
    }
}
