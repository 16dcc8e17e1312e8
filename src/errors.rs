use std::fmt;

use crate::models::booking::BookingStatus;
use crate::services::messaging_service::GatewayError;

/// Main error type for the teknisi booking core
#[derive(Debug)]
pub enum TeknisiError {
    // Notification delivery errors
    Gateway(GatewayError),

    // Booking lifecycle errors
    InvalidStatusTransition { from: BookingStatus, to: BookingStatus },

    // Serialization and parsing errors
    JsonParsing(String),
    JsonSerialization(String),

    // Configuration and setup errors
    MissingEnvironmentVariable(String),
    InvalidConfiguration(String),
}

impl fmt::Display for TeknisiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeknisiError::Gateway(err) => write!(f, "Notification gateway error: {}", err),

            TeknisiError::InvalidStatusTransition { from, to } => {
                write!(f, "Invalid booking status transition: {} -> {}", from, to)
            }

            TeknisiError::JsonParsing(msg) => write!(f, "JSON parsing error: {}", msg),
            TeknisiError::JsonSerialization(msg) => write!(f, "JSON serialization error: {}", msg),

            TeknisiError::MissingEnvironmentVariable(var) => {
                write!(f, "Missing environment variable: {}", var)
            }
            TeknisiError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for TeknisiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TeknisiError::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

// Convenience type alias for Results
pub type TeknisiResult<T> = Result<T, TeknisiError>;

impl From<GatewayError> for TeknisiError {
    fn from(err: GatewayError) -> Self {
        TeknisiError::Gateway(err)
    }
}

impl From<reqwest::Error> for TeknisiError {
    fn from(err: reqwest::Error) -> Self {
        TeknisiError::Gateway(GatewayError::from(err))
    }
}

impl From<serde_json::Error> for TeknisiError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            TeknisiError::JsonParsing(err.to_string())
        } else {
            TeknisiError::JsonSerialization(err.to_string())
        }
    }
}

// Helper functions for creating common errors
impl TeknisiError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        TeknisiError::InvalidConfiguration(msg.into())
    }

    pub fn missing_env(var: impl Into<String>) -> Self {
        TeknisiError::MissingEnvironmentVariable(var.into())
    }

    pub fn invalid_transition(from: BookingStatus, to: BookingStatus) -> Self {
        TeknisiError::InvalidStatusTransition { from, to }
    }
}
