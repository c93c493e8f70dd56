// src/error.rs

//! Unified error handling for the archive client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request could not be built or its body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The backend never answered (refused, reset, timed out)
    #[error("network connection error, check that the backend service is running")]
    Connectivity,

    /// The backend answered with an error status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The backend answered 200 but reported `success: false`
    #[error("{0}")]
    Rejected(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a server error, falling back to a generic message.
    pub fn server(status: u16, message: Option<impl fmt::Display>) -> Self {
        Self::Server {
            status,
            message: message
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("server error: {status}")),
        }
    }

    /// Create a logical-failure error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Whether this error means the backend was unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_uses_backend_message() {
        let err = AppError::server(401, Some("login required"));
        assert_eq!(err.to_string(), "login required");
    }

    #[test]
    fn server_error_falls_back_to_status() {
        let err = AppError::server(503, None::<String>);
        assert_eq!(err.to_string(), "server error: 503");
    }

    #[test]
    fn toml_serialize_errors_convert() {
        let err: AppError = toml::to_string(&42u32).unwrap_err().into();
        assert!(matches!(err, AppError::TomlSerialize(_)));
    }

    #[test]
    fn rejected_displays_bare_message() {
        assert_eq!(AppError::rejected("login required").to_string(), "login required");
    }
}
