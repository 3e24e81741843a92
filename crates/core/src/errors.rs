use thiserror::Error;

use crate::models::suggestion::Suggestion;

pub const NO_PROVIDER_AVAILABLE_MESSAGE: &str = "No providers are available at this time. There are currently no available time slots in the system.";
pub const NO_EXACT_MATCH_MESSAGE: &str = "No providers are available for the requested time slot. Please choose from the available alternatives below.";

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("{}", NO_PROVIDER_AVAILABLE_MESSAGE)]
    NoProviderAvailable,

    #[error("{}", NO_EXACT_MATCH_MESSAGE)]
    NoExactMatch { suggestions: Vec<Suggestion> },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    /// Suggestions carried by the error, empty for every variant but `NoExactMatch`.
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            ScheduleError::NoExactMatch { suggestions } => suggestions,
            _ => &[],
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
