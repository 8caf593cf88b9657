//! Authentication credentials for the Coincheck API
//!
//! Implements HMAC-SHA256 signing as required by Coincheck's private endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "COINCHECK_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "COINCHECK_API_SECRET";

/// Header carrying the API key
pub const HEADER_ACCESS_KEY: &str = "ACCESS-KEY";
/// Header carrying the request nonce
pub const HEADER_ACCESS_NONCE: &str = "ACCESS-NONCE";
/// Header carrying the hex-encoded signature
pub const HEADER_ACCESS_SIGNATURE: &str = "ACCESS-SIGNATURE";

/// Last nonce handed out by this process
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// API credentials for authenticated requests
///
/// The secret is only ever used as the HMAC key. It is never sent over the
/// wire and is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (sent as `ACCESS-KEY`)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "API secret is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINCHECK_API_KEY` and `COINCHECK_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Generate a unique nonce for this request
    ///
    /// Nonces must be strictly increasing. We use the nanosecond timestamp and
    /// fall back to `previous + 1` when the clock has not moved forward, so
    /// concurrent callers in the same process never share or reorder a value.
    pub fn generate_nonce() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        let next = |last: u64| now.max(last.saturating_add(1));

        // The closure never returns None, so both arms carry the previous value.
        let previous = match LAST_NONCE.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(next(last))
        }) {
            Ok(previous) | Err(previous) => previous,
        };

        next(previous).to_string()
    }

    /// Sign a request for Coincheck's API
    ///
    /// Coincheck signature algorithm:
    /// 1. message = nonce + url + body (no separators)
    /// 2. HMAC-SHA256(api_secret, message)
    /// 3. Lowercase hex encode result
    ///
    /// # Arguments
    /// * `nonce` - Unique nonce for this request
    /// * `url` - Fully-qualified request URL, including the query string
    /// * `body` - Raw request body (empty for GET requests)
    pub fn sign(&self, nonce: &str, url: &str, body: &[u8]) -> AuthResult<String> {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(nonce.as_bytes());
        mac.update(url.as_bytes());
        mac.update(body);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretString with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown: String = self.api_key.chars().take(4).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", shown))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for building authenticated requests
///
/// Binds the credentials to a nonce generated at construction time. Create
/// one per request.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a fresh nonce
    pub fn new(credentials: &'a Credentials) -> Self {
        Self {
            credentials,
            nonce: Credentials::generate_nonce(),
        }
    }

    /// Create a signer with a caller-chosen nonce
    pub fn with_nonce(credentials: &'a Credentials, nonce: impl Into<String>) -> Self {
        Self {
            credentials,
            nonce: nonce.into(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request URL and body
    pub fn sign(&self, url: &str, body: &[u8]) -> AuthResult<String> {
        self.credentials.sign(&self.nonce, url, body)
    }

    /// The three authentication headers, in the order Coincheck documents them
    pub fn headers(&self, url: &str, body: &[u8]) -> AuthResult<[(&'static str, String); 3]> {
        let signature = self.sign(url, body)?;
        Ok([
            (HEADER_ACCESS_KEY, self.api_key().to_string()),
            (HEADER_ACCESS_NONCE, self.nonce.clone()),
            (HEADER_ACCESS_SIGNATURE, signature),
        ])
    }
}
