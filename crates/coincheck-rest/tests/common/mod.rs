//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes documented for Coincheck's REST API.

use coincheck_rest::{ClientConfig, CoincheckClient, Credentials};
use httpmock::MockServer;
use serde_json::{json, Value};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";

/// Ticker body; `volume` is a string on the wire
pub fn ticker_body() -> Value {
    json!({
        "last": 100,
        "bid": 99,
        "ask": 101,
        "high": 105,
        "low": 95,
        "volume": "12.5",
        "timestamp": 1000
    })
}

fn transaction(id: u64, side: &str, liquidity: &str) -> Value {
    json!({
        "id": id,
        "order_id": id + 100,
        "created_at": "2015-11-18T07:02:21.000Z",
        "funds": {"btc": "0.1", "jpy": "-4096.135"},
        "pair": "btc_jpy",
        "rate": "40900.0",
        "fee_currency": "JPY",
        "fee": "6.135",
        "liquidity": liquidity,
        "side": side
    })
}

/// Plain order history body
pub fn order_history_body() -> Value {
    json!({
        "success": true,
        "transactions": [transaction(38, "buy", "T"), transaction(37, "sell", "M")]
    })
}

/// Paginated order history body
pub fn order_history_pagination_body() -> Value {
    json!({
        "success": true,
        "pagination": {
            "limit": 10,
            "order": "desc",
            "starting_after": null,
            "ending_before": null
        },
        "data": [transaction(38, "buy", "T")]
    })
}

/// Send history body
pub fn sent_history_body() -> Value {
    json!({
        "success": true,
        "sends": [{
            "id": 2,
            "amount": "0.05",
            "currency": "BTC",
            "fee": "0.0005",
            "address": "1Gp9MCp7FWqNgaUWdiUiRPjGqNVdqug2hY",
            "created_at": "2015-06-13T08:25:20.000Z"
        }]
    })
}

/// Deposit history body
pub fn deposit_history_body() -> Value {
    json!({
        "success": true,
        "deposits": [
            {
                "id": 2,
                "amount": "0.05",
                "currency": "BTC",
                "address": "3AQ5vMs8ivRqQrGDUDqBrM4m2BhHXbn6pD",
                "status": "confirmed",
                "confirmed_at": "2015-06-13T08:29:18.000Z",
                "created_at": "2015-06-13T08:22:18.000Z"
            },
            {
                "id": 3,
                "amount": "1.2",
                "currency": "BTC",
                "address": "3AQ5vMs8ivRqQrGDUDqBrM4m2BhHXbn6pD",
                "status": "pending",
                "confirmed_at": null,
                "created_at": "2015-06-14T01:00:00.000Z"
            }
        ]
    })
}

/// Open orders body
pub fn open_orders_body() -> Value {
    json!({
        "success": true,
        "orders": [
            {
                "id": 202835,
                "order_type": "buy",
                "rate": 26890,
                "pair": "btc_jpy",
                "pending_amount": "0.5527",
                "pending_market_buy_amount": null,
                "stop_loss_rate": null,
                "created_at": "2015-01-10T05:55:38.000Z"
            }
        ]
    })
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(format!("{}/api", server.base_url()))
        .with_timeout(5)
}

/// Client without credentials pointed at the mock server
pub fn public_client(server: &MockServer) -> CoincheckClient {
    CoincheckClient::with_config(config(server)).expect("Failed to build client")
}

/// Client with test credentials pointed at the mock server
pub fn auth_client(server: &MockServer) -> CoincheckClient {
    let creds = Credentials::new(API_KEY, API_SECRET).expect("Failed to build credentials");
    CoincheckClient::with_config(config(server).with_credentials(creds))
        .expect("Failed to build client")
}
