//! REST API client for the Coincheck cryptocurrency exchange
//!
//! This crate provides a typed client for Coincheck's public market data and
//! private account endpoints.
//!
//! # Features
//!
//! - **Market Data**: Ticker
//! - **Account**: Order history (plain or cursor-paginated), open orders
//! - **Funding**: Send and deposit history
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each private request carries
//! `ACCESS-KEY`, `ACCESS-NONCE` and `ACCESS-SIGNATURE` headers, the signature
//! being HMAC-SHA256 over nonce, URL and body (see `coincheck-auth`).
//!
//! # Errors
//!
//! Coincheck can answer HTTP 200 with `{"success": false, "error": "..."}`.
//! Every private call checks that envelope and surfaces
//! [`RestError::Api`] or [`RestError::UnknownApi`] instead of a payload.
//!
//! # Example
//!
//! ```no_run
//! use coincheck_rest::{CoincheckClient, Credentials, PaginationRequest, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoincheckClient::new()?;
//!     let ticker = client.ticker().await?;
//!     println!("BTC/JPY: {}", ticker.last);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CoincheckClient::with_credentials(creds)?;
//!     let page = PaginationRequest::new().limit(10).order(SortOrder::Desc);
//!     let history = auth_client.order_history(Some(&page)).await?;
//!     println!("Fills: {}", history.entries().len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod endpoints;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoincheckClient, DEFAULT_BASE_URL};
pub use coincheck_auth::{AuthError, Credentials};
pub use error::{RestError, RestResult};

// Re-export endpoint-specific types
pub use types::{
    // Envelope and pagination
    ApiResponse, PaginationRequest, PaginationResponse, SortOrder,
    // Market data
    Ticker,
    // Account
    Liquidity, OpenOrder, OpenOrdersResponse, OrderHistoryEntry, OrderHistoryResponse,
    OrderSide, OrderType,
    // Funding
    DepositHistoryEntry, DepositHistoryResponse, SentHistoryEntry, SentHistoryResponse,
};
