//! Error types for REST API operations

use coincheck_auth::AuthError;
use reqwest::StatusCode;

/// Message used when the exchange reports failure without saying why
pub const UNKNOWN_API_ERROR: &str = "unknown API error";

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-success HTTP status with a body that is not an API envelope
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status returned by the exchange
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// API returned an explicit error message
    #[error("API error: {message}")]
    Api {
        /// Original error message from API
        message: String,
    },

    /// API reported `success: false` without an error message
    #[error("{}", UNKNOWN_API_ERROR)]
    UnknownApi,

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential or signing failure
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Base URL or endpoint path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Create an API error from the message returned by Coincheck
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Check if the exchange itself rejected the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::UnknownApi)
    }

    /// The exchange's error message, if it sent one
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
