//! Error types for Proxmox VE client operations.
//!
//! The original API surface signalled resource failures through magic strings
//! mixed into the success channel; here every failure class is a distinct
//! variant carrying the information callers need (numeric HTTP status for API
//! rejections, cause text for everything else).

use thiserror::Error;

/// Main error type for Proxmox VE operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The API answered a resource request with a non-200 status.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the cluster
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Network, DNS, or TLS-level failure before a response arrived
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// A 200 response whose body was not the expected JSON envelope
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid base URL or resource path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Proxmox VE operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build the API error for a rejected resource request.
    ///
    /// The message keeps the `NOK: error code = <status>` wording of the
    /// original client so log scrapers keep working.
    #[must_use]
    pub fn api(status: u16) -> Self {
        Self::Api {
            status,
            message: format!("NOK: error code = {status}"),
        }
    }

    /// Returns the HTTP status code for API rejections, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Api { .. } => "API_ERROR",
            Self::Transport(_) => "TRANSPORT_FAILURE",
            Self::Timeout(_) => "TIMEOUT",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
