//! Error types for authentication operations

/// Errors that can occur while loading credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// The HMAC could not be keyed with the secret
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
