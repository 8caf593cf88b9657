//! Funding endpoints for deposits and sends
//!
//! These endpoints require authentication.

use crate::client::CoincheckClient;
use crate::error::{RestError, RestResult};
use crate::types::{DepositHistoryResponse, SentHistoryResponse};
use tracing::{debug, instrument};

/// Outgoing transfers
pub const SEND_MONEY_PATH: &str = "/send_money";
/// Incoming deposits
pub const DEPOSIT_MONEY_PATH: &str = "/deposit_money";

/// Funding endpoints for deposits and sends
pub struct FundingEndpoints<'a> {
    client: &'a CoincheckClient,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(client: &'a CoincheckClient) -> Self {
        Self { client }
    }

    /// Get outgoing transfers
    ///
    /// # Arguments
    /// * `currency` - Currency to list sends for (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn sent_history(&self, currency: &str) -> RestResult<SentHistoryResponse> {
        let params = currency_param(currency)?;
        debug!("Fetching send history for {}", currency);
        self.client.get_private(SEND_MONEY_PATH, &params).await
    }

    /// Get incoming deposits
    ///
    /// # Arguments
    /// * `currency` - Currency to list deposits for (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn deposit_history(&self, currency: &str) -> RestResult<DepositHistoryResponse> {
        let params = currency_param(currency)?;
        debug!("Fetching deposit history for {}", currency);
        self.client.get_private(DEPOSIT_MONEY_PATH, &params).await
    }
}

fn currency_param(currency: &str) -> RestResult<[(&'static str, String); 1]> {
    let currency = currency.trim();
    if currency.is_empty() {
        return Err(RestError::InvalidParameter(
            "currency must not be empty".to_string(),
        ));
    }
    Ok([("currency", currency.to_string())])
}
