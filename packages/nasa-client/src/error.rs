//! NASA API error types

use nasa_shared_config::ConfigError;
use thiserror::Error;

/// NASA API client errors
#[derive(Error, Debug)]
pub enum NasaError {
    /// A parameter value is outside its accepted set or range
    #[error("invalid value for {param}: {message}")]
    InvalidArgument { param: String, message: String },

    /// A loosely typed parameter has the wrong type
    #[error("{param} parameter must be {expected}")]
    TypeMismatch {
        param: String,
        expected: &'static str,
    },

    /// The API answered with a non-200 status
    #[error("HTTP {status} {reason} for {url}")]
    HttpFailure {
        status: u16,
        reason: String,
        url: String,
    },

    /// The request could not be completed (DNS, connection, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("Failed to parse NASA API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl NasaError {
    pub(crate) fn invalid_argument(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Build an `InvalidArgument` error that enumerates the accepted values
    pub(crate) fn not_one_of(param: &str, value: &str, allowed: &[&str]) -> Self {
        let allowed = allowed
            .iter()
            .map(|v| format!("'{}'", v))
            .collect::<Vec<_>>()
            .join(", ");
        Self::invalid_argument(
            param,
            format!("'{}' is not one of ({})", value, allowed),
        )
    }

    pub(crate) fn type_mismatch(param: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            param: param.into(),
            expected,
        }
    }

    /// HTTP status code, if this error came from a non-200 response
    pub fn status(&self) -> Option<u16> {
        match self {
            NasaError::HttpFailure { status, .. } => Some(*status),
            NasaError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error was raised locally, before anything was sent
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            NasaError::InvalidArgument { .. } | NasaError::TypeMismatch { .. }
        )
    }
}

/// Result type for NASA API operations
pub type NasaResult<T> = Result<T, NasaError>;
