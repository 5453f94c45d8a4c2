//! Error types for Kulture

use crate::navigation::Screen;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KultureError {
    // Data source errors
    #[error("Data source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("Storage query failed: {reason}")]
    Storage { reason: String },

    #[error("Region not found: {name}")]
    NotFound { name: String },

    // Navigation errors
    #[error("Screen {screen} requires a selected region but none is set")]
    MissingContext { screen: Screen },

    #[error("Event '{event}' is not allowed from the {from} screen")]
    InvalidTransition { from: Screen, event: &'static str },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KultureError {
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    /// Message safe to show to an end user.
    ///
    /// Backend error text stays in the logs; only the taxonomy reaches users.
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceUnavailable { .. } => {
                "Cultural data is unavailable right now. Please try again.".to_string()
            }
            Self::Storage { .. } => "Some cultural data could not be loaded.".to_string(),
            Self::NotFound { name } => format!("We could not find a state named \"{}\".", name),
            Self::MissingContext { .. } => {
                "Please choose a state to explore first.".to_string()
            }
            Self::InvalidTransition { .. } => "That action is not available here.".to_string(),
            Self::InvalidDateRange { .. } => {
                "The start date must not be after the end date.".to_string()
            }
            Self::InvalidCoordinate { .. }
            | Self::ConfigMissing { .. }
            | Self::ConfigInvalid { .. }
            | Self::Io(_)
            | Self::Serialization(_) => "Something went wrong.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KultureError>;
