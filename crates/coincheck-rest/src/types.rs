//! Types for Coincheck REST API requests and responses

use crate::error::{RestError, RestResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard Coincheck API response envelope
///
/// Every private endpoint wraps its payload with `success` and, on failure,
/// `error`. The exchange may answer HTTP 200 with `success: false`, so the
/// envelope must be checked even when the transport succeeded.
///
/// Only the two status fields are decoded here. The payload is parsed from
/// the same body after [`ApiResponse::into_result`] passes, so a failed call
/// whose payload fields are `null` or malformed still reports its message.
#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    /// Whether the exchange accepted the request
    #[serde(default)]
    pub success: bool,
    /// Error message (absent or empty if successful)
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.success && self.error.as_deref().map_or(true, str::is_empty)
    }

    /// Turn the envelope into an error if the API reported one
    ///
    /// A non-empty `error` wins over the `success` flag. A bare
    /// `success: false` becomes [`RestError::UnknownApi`].
    pub fn into_result(self) -> RestResult<()> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Err(RestError::Api { message });
        }
        if !self.success {
            return Err(RestError::UnknownApi);
        }
        Ok(())
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Sort direction for paginated endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("invalid order '{}', expected 'asc' or 'desc'", other)),
        }
    }
}

/// Pagination options for list endpoints
///
/// Passing one of these to a list call selects the paginated variant of the
/// endpoint. Unset fields are left out of the query string.
///
/// # Example
///
/// ```
/// use coincheck_rest::{PaginationRequest, SortOrder};
///
/// let page = PaginationRequest::new().limit(10).order(SortOrder::Desc);
/// assert_eq!(page.to_query_string().unwrap(), "limit=10&order=desc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationRequest {
    /// Maximum number of entries to return
    pub limit: Option<u32>,
    /// Sort direction
    pub order: Option<SortOrder>,
    /// Only entries with an ID greater than this
    pub starting_after: Option<u64>,
    /// Only entries with an ID less than this
    pub ending_before: Option<u64>,
}

impl PaginationRequest {
    /// Create an empty pagination request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort direction
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Start after this entry ID
    pub fn starting_after(mut self, id: u64) -> Self {
        self.starting_after = Some(id);
        self
    }

    /// End before this entry ID
    pub fn ending_before(mut self, id: u64) -> Self {
        self.ending_before = Some(id);
        self
    }

    /// Query parameters for the set fields, sorted by key
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        // Zero limits and cursors mean "unset" on the exchange side.
        if let Some(id) = self.ending_before.filter(|&id| id > 0) {
            params.push(("ending_before", id.to_string()));
        }
        if let Some(limit) = self.limit.filter(|&limit| limit > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }
        if let Some(id) = self.starting_after.filter(|&id| id > 0) {
            params.push(("starting_after", id.to_string()));
        }

        params
    }

    /// URL-encoded query string for the set fields
    pub fn to_query_string(&self) -> RestResult<String> {
        serde_urlencoded::to_string(self.query_params())
            .map_err(|e| RestError::InvalidParameter(e.to_string()))
    }
}

/// Pagination metadata returned by paginated endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationResponse {
    /// Page size the exchange applied
    pub limit: Option<u32>,
    /// Sort direction the exchange applied
    pub order: Option<SortOrder>,
    /// Lower cursor bound echoed back
    pub starting_after: Option<u64>,
    /// Upper cursor bound echoed back
    pub ending_before: Option<u64>,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Latest ticker for the default pair
///
/// This endpoint returns the payload bare, without an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Last traded price
    pub last: f64,
    /// Best bid
    pub bid: f64,
    /// Best ask
    pub ask: f64,
    /// 24h high
    pub high: f64,
    /// 24h low
    pub low: f64,
    /// 24h volume (sent as a JSON string)
    #[serde(with = "float_string")]
    pub volume: f64,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

impl Ticker {
    /// Mid price (average of bid and ask)
    pub fn mid_price(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Bid/ask spread
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Buy/sell side of an executed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Whether a fill added or removed liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liquidity {
    #[serde(rename = "T")]
    Taker,
    #[serde(rename = "M")]
    Maker,
}

/// Order type as reported by the open orders endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Buy,
    Sell,
    MarketBuy,
    MarketSell,
}

/// One fill from the order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    /// Transaction ID
    pub id: u64,
    /// Order the fill belongs to
    pub order_id: u64,
    /// Execution time
    pub created_at: DateTime<Utc>,
    /// Balance change per currency (e.g. `btc`, `jpy`)
    pub funds: HashMap<String, Decimal>,
    /// Trading pair (e.g. `btc_jpy`)
    pub pair: String,
    /// Execution price
    pub rate: Decimal,
    /// Currency the fee was charged in
    pub fee_currency: Option<String>,
    /// Fee charged
    pub fee: Decimal,
    /// Taker or maker
    pub liquidity: Liquidity,
    /// Buy or sell
    pub side: OrderSide,
}

/// Order history payload
///
/// The paginated endpoint returns entries under `data` alongside a
/// `pagination` object; the plain endpoint uses `transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderHistoryResponse {
    /// Pagination metadata (paginated endpoint only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationResponse>,
    /// Entries from the paginated endpoint
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<OrderHistoryEntry>,
    /// Entries from the plain endpoint
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<OrderHistoryEntry>,
}

impl OrderHistoryResponse {
    /// Entries regardless of which endpoint variant produced them
    pub fn entries(&self) -> &[OrderHistoryEntry] {
        if self.data.is_empty() {
            &self.transactions
        } else {
            &self.data
        }
    }
}

/// An order still resting on the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    /// Order ID
    pub id: u64,
    /// Buy, sell or their market variants
    pub order_type: OrderType,
    /// Limit price (absent for market orders)
    pub rate: Option<Decimal>,
    /// Trading pair
    pub pair: String,
    /// Unfilled amount
    pub pending_amount: Option<Decimal>,
    /// Unfilled quote amount for market buys
    pub pending_market_buy_amount: Option<Decimal>,
    /// Stop price, if any
    pub stop_loss_rate: Option<Decimal>,
    /// Order creation time
    pub created_at: DateTime<Utc>,
}

/// Open orders payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOrdersResponse {
    /// Resting orders
    pub orders: Vec<OpenOrder>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// One outgoing crypto transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentHistoryEntry {
    /// Send ID
    pub id: u64,
    /// Amount sent
    pub amount: Decimal,
    /// Currency (e.g. `BTC`)
    pub currency: String,
    /// Network fee
    pub fee: Decimal,
    /// Destination address
    pub address: String,
    /// Request time
    pub created_at: DateTime<Utc>,
}

/// Send history payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentHistoryResponse {
    /// Pagination metadata, when the exchange includes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationResponse>,
    /// Sends, newest first
    pub sends: Vec<SentHistoryEntry>,
}

/// One incoming crypto deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositHistoryEntry {
    /// Deposit ID
    pub id: u64,
    /// Amount received
    pub amount: Decimal,
    /// Currency (e.g. `BTC`)
    pub currency: String,
    /// Receiving address
    pub address: String,
    /// `pending` or `confirmed`
    pub status: String,
    /// Confirmation time (absent while pending)
    pub confirmed_at: Option<DateTime<Utc>>,
    /// First seen time
    pub created_at: DateTime<Utc>,
}

/// Deposit history payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositHistoryResponse {
    /// Pagination metadata, when the exchange includes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationResponse>,
    /// Deposits, newest first
    pub deposits: Vec<DepositHistoryEntry>,
}

// ============================================================================
// Serde helpers
// ============================================================================

/// `f64` carried as a JSON string (`"12.5"`). Bare numbers are accepted too.
mod float_string {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FloatVisitor;

        impl Visitor<'_> for FloatVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a float or a string containing a float")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.trim().parse().map_err(E::custom)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v as f64)
            }
        }

        deserializer.deserialize_any(FloatVisitor)
    }
}
