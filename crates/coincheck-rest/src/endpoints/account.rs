//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::client::CoincheckClient;
use crate::error::RestResult;
use crate::types::{OpenOrdersResponse, OrderHistoryResponse, PaginationRequest};
use tracing::{debug, instrument};

/// Full order history
pub const ORDER_HISTORY_PATH: &str = "/exchange/orders/transactions";
/// Cursor-paginated order history
pub const ORDER_HISTORY_PAGINATION_PATH: &str = "/exchange/orders/transactions_pagination";
/// Orders still on the book
pub const OPEN_ORDERS_PATH: &str = "/exchange/orders/opens";

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a CoincheckClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a CoincheckClient) -> Self {
        Self { client }
    }

    /// Get executed trades
    ///
    /// # Arguments
    /// * `page` - Pagination options. `Some` selects the paginated endpoint,
    ///   even when every option is unset.
    #[instrument(skip(self))]
    pub async fn order_history(
        &self,
        page: Option<&PaginationRequest>,
    ) -> RestResult<OrderHistoryResponse> {
        match page {
            Some(page) => {
                debug!("Fetching paginated order history");
                self.client
                    .get_private(ORDER_HISTORY_PAGINATION_PATH, &page.query_params())
                    .await
            }
            None => {
                debug!("Fetching order history");
                self.client.get_private(ORDER_HISTORY_PATH, &[]).await
            }
        }
    }

    /// Get open orders
    #[instrument(skip(self))]
    pub async fn open_orders(&self) -> RestResult<OpenOrdersResponse> {
        debug!("Fetching open orders");
        self.client.get_private(OPEN_ORDERS_PATH, &[]).await
    }
}
