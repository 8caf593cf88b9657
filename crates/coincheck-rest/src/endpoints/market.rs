//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::CoincheckClient;
use crate::error::RestResult;
use crate::types::Ticker;
use tracing::{debug, instrument};

/// Latest ticker
pub const TICKER_PATH: &str = "/ticker";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a CoincheckClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a CoincheckClient) -> Self {
        Self { client }
    }

    /// Get the latest ticker
    ///
    /// The ticker is returned bare, so there is no success flag to check.
    #[instrument(skip(self))]
    pub async fn ticker(&self) -> RestResult<Ticker> {
        debug!("Fetching ticker");
        self.client.get_public(TICKER_PATH, &[]).await
    }
}
