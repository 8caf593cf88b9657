//! Authentication for the Coincheck REST API
//!
//! Private Coincheck endpoints expect three headers on every request:
//!
//! - `ACCESS-KEY`: the API key, in clear text
//! - `ACCESS-NONCE`: a strictly increasing number
//! - `ACCESS-SIGNATURE`: `hex(HMAC-SHA256(secret, nonce + url + body))`
//!
//! This crate holds the credentials and computes those values. It does not
//! perform any HTTP itself; see `coincheck-rest` for the client.
//!
//! # Example
//!
//! ```no_run
//! use coincheck_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     let signer = RequestSigner::new(&creds);
//!     let signature = signer.sign("https://coincheck.com/api/exchange/orders/opens", b"")?;
//!     println!("nonce={} signature={}", signer.nonce(), signature);
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{
    Credentials, RequestSigner, API_KEY_ENV, API_SECRET_ENV, HEADER_ACCESS_KEY,
    HEADER_ACCESS_NONCE, HEADER_ACCESS_SIGNATURE,
};
pub use error::{AuthError, AuthResult};
