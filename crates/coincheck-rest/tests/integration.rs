//! Integration tests for the Coincheck REST client
//!
//! Runs each operation against a local mock server and checks request shape,
//! authentication headers and envelope handling.

mod common;

use common::*;
use coincheck_rest::{
    ClientConfig, CoincheckClient, Liquidity, OrderSide, OrderType, PaginationRequest, RestError,
    SortOrder,
};
use httpmock::{Method::GET, MockServer};
use reqwest::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

// =============================================================================
// Public Endpoints
// =============================================================================

mod ticker {
    use super::*;

    #[tokio::test]
    async fn ticker_should_parse_string_volume() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = public_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/ticker");
            then.status(StatusCode::OK).json_body(ticker_body());
        });

        let ticker = client.ticker().await?;

        assert_eq!(ticker.volume, 12.5);
        assert_eq!(ticker.last, 100.0);
        assert_eq!(ticker.bid, 99.0);
        assert_eq!(ticker.ask, 101.0);
        assert_eq!(ticker.high, 105.0);
        assert_eq!(ticker.low, 95.0);
        assert_eq!(ticker.timestamp, 1000);
        mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn ticker_should_not_send_auth_headers() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let signed = server.mock(|when, then| {
            when.method(GET)
                .path("/api/ticker")
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK).json_body(ticker_body());
        });
        let unsigned = server.mock(|when, then| {
            when.method(GET).path("/api/ticker");
            then.status(StatusCode::OK).json_body(ticker_body());
        });

        client.ticker().await?;

        signed.assert_hits(0);
        unsigned.assert();

        Ok(())
    }

    #[tokio::test]
    async fn ticker_malformed_body_is_decode_error() {
        let server = MockServer::start();
        let client = public_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/ticker");
            then.status(StatusCode::OK).body("{\"last\": ");
        });

        let err = client.ticker().await.unwrap_err();
        assert!(matches!(err, RestError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn ticker_server_error_reports_status() {
        let server = MockServer::start();
        let client = public_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/ticker");
            then.status(StatusCode::BAD_GATEWAY).body("upstream down");
        });

        match client.ticker().await {
            Err(RestError::Status { status, body }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Nothing listens on port 1
        let client = CoincheckClient::with_config(
            ClientConfig::new()
                .with_base_url("http://127.0.0.1:1/api")
                .with_timeout(5),
        )
        .unwrap();

        let err = client.ticker().await.unwrap_err();
        assert!(matches!(err, RestError::Http(_)), "got {err:?}");
    }
}

// =============================================================================
// Account Endpoints
// =============================================================================

mod order_history {
    use super::*;

    #[tokio::test]
    async fn order_history_without_pagination() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/exchange/orders/transactions")
                .header("ACCESS-KEY", API_KEY)
                .header_exists("ACCESS-NONCE")
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK).json_body(order_history_body());
        });

        let history = client.order_history(None).await?;

        assert!(history.pagination.is_none());
        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 38);
        assert_eq!(entries[0].order_id, 138);
        assert_eq!(entries[0].side, OrderSide::Buy);
        assert_eq!(entries[0].liquidity, Liquidity::Taker);
        assert_eq!(entries[0].rate, dec!(40900.0));
        assert_eq!(entries[0].funds["btc"], dec!(0.1));
        assert_eq!(entries[1].side, OrderSide::Sell);
        assert_eq!(entries[1].liquidity, Liquidity::Maker);
        mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn order_history_with_pagination() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/exchange/orders/transactions_pagination")
                .query_param("limit", "10")
                .query_param("order", "desc")
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK)
                .json_body(order_history_pagination_body());
        });

        let page = PaginationRequest::new().limit(10).order(SortOrder::Desc);
        let history = client.order_history(Some(&page)).await?;

        let pagination = history.pagination.clone().expect("pagination metadata");
        assert_eq!(pagination.limit, Some(10));
        assert_eq!(pagination.order, Some(SortOrder::Desc));
        assert_eq!(history.entries().len(), 1);
        mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn order_history_requires_credentials() {
        let server = MockServer::start();
        let client = public_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/exchange/orders/transactions");
            then.status(StatusCode::OK).json_body(order_history_body());
        });

        let err = client.order_history(None).await.unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));
        mock.assert_hits(0);
    }
}

mod open_orders {
    use super::*;

    #[tokio::test]
    async fn open_orders_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/exchange/orders/opens")
                .header("ACCESS-KEY", API_KEY)
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK).json_body(open_orders_body());
        });

        let response = client.open_orders().await?;

        assert_eq!(response.orders.len(), 1);
        let order = &response.orders[0];
        assert_eq!(order.id, 202835);
        assert_eq!(order.order_type, OrderType::Buy);
        assert_eq!(order.rate, Some(dec!(26890)));
        assert_eq!(order.pending_amount, Some(dec!(0.5527)));
        assert_eq!(order.stop_loss_rate, None);
        mock.assert();

        Ok(())
    }
}

// =============================================================================
// Funding Endpoints
// =============================================================================

mod funding {
    use super::*;

    #[tokio::test]
    async fn sent_history_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/send_money")
                .query_param("currency", "BTC")
                .header_exists("ACCESS-NONCE")
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK).json_body(sent_history_body());
        });

        let response = client.sent_history("BTC").await?;

        assert_eq!(response.sends.len(), 1);
        assert_eq!(response.sends[0].amount, dec!(0.05));
        assert_eq!(response.sends[0].fee, dec!(0.0005));
        assert_eq!(response.sends[0].currency, "BTC");
        mock.assert();

        Ok(())
    }

    #[tokio::test]
    async fn deposit_history_should_succeed() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/deposit_money")
                .query_param("currency", "BTC")
                .header_exists("ACCESS-SIGNATURE");
            then.status(StatusCode::OK).json_body(deposit_history_body());
        });

        let response = client.deposit_history("BTC").await?;

        assert_eq!(response.deposits.len(), 2);
        assert_eq!(response.deposits[0].status, "confirmed");
        assert!(response.deposits[0].confirmed_at.is_some());
        assert_eq!(response.deposits[1].amount, dec!(1.2));
        assert!(response.deposits[1].confirmed_at.is_none());
        mock.assert();

        Ok(())
    }
}

// =============================================================================
// Envelope Handling
// =============================================================================

mod envelope {
    use super::*;

    #[tokio::test]
    async fn error_message_is_surfaced_verbatim() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/deposit_money");
            then.status(StatusCode::OK).json_body(json!({
                "success": false,
                "error": "invalid authentication"
            }));
        });

        let err = client.deposit_history("BTC").await.unwrap_err();
        assert_eq!(err.api_message(), Some("invalid authentication"));
    }

    #[tokio::test]
    async fn error_message_wins_even_when_success_is_true() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/send_money");
            then.status(StatusCode::OK).json_body(json!({
                "success": true,
                "error": "currency is not supported",
                "sends": []
            }));
        });

        let err = client.sent_history("XYZ").await.unwrap_err();
        assert_eq!(err.api_message(), Some("currency is not supported"));
    }

    #[tokio::test]
    async fn error_message_survives_null_payload() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/send_money");
            then.status(StatusCode::OK).json_body(json!({
                "success": false,
                "error": "boom",
                "sends": null
            }));
        });

        let err = client.sent_history("BTC").await.unwrap_err();
        assert_eq!(err.api_message(), Some("boom"), "got {err:?}");
    }

    #[tokio::test]
    async fn null_payload_on_success_is_decode_error() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/send_money");
            then.status(StatusCode::OK).json_body(json!({
                "success": true,
                "sends": null
            }));
        });

        let err = client.sent_history("BTC").await.unwrap_err();
        assert!(matches!(err, RestError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn false_success_without_message_is_unknown_error() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/exchange/orders/opens");
            then.status(StatusCode::OK).json_body(json!({ "success": false }));
        });

        let err = client.open_orders().await.unwrap_err();
        assert!(matches!(err, RestError::UnknownApi), "got {err:?}");
        assert_eq!(err.to_string(), "unknown API error");
    }

    #[tokio::test]
    async fn error_envelope_on_http_error_status() {
        let server = MockServer::start();
        let client = auth_client(&server);

        server.mock(|when, then| {
            when.method(GET).path("/api/exchange/orders/transactions");
            then.status(StatusCode::UNAUTHORIZED).json_body(json!({
                "success": false,
                "error": "invalid authentication"
            }));
        });

        let err = client.order_history(None).await.unwrap_err();
        assert_eq!(err.api_message(), Some("invalid authentication"));
    }
}

// =============================================================================
// Signing on the wire
// =============================================================================

mod signing {
    use super::*;
    use coincheck_rest::Credentials;

    #[tokio::test]
    async fn signature_matches_received_url_and_nonce() -> anyhow::Result<()> {
        let server = MockServer::start();
        let client = auth_client(&server);

        let request = client.new_private_request(
            reqwest::Method::GET,
            "/send_money",
            &[("currency", "BTC".to_string())],
            None,
        )?;
        let nonce = request.headers()["ACCESS-NONCE"].to_str()?.to_string();

        // Rebuild the URL from what the server will see, independent of the client.
        let received_url = format!("{}/api/send_money?currency=BTC", server.base_url());
        let expected = Credentials::new(API_KEY, API_SECRET)?.sign(&nonce, &received_url, b"")?;

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/send_money")
                .query_param("currency", "BTC")
                .header("ACCESS-KEY", API_KEY)
                .header("ACCESS-NONCE", nonce.as_str())
                .header("ACCESS-SIGNATURE", expected.as_str());
            then.status(StatusCode::OK).json_body(sent_history_body());
        });

        let response = client.send(request).await?;
        assert_eq!(response.status(), StatusCode::OK);
        mock.assert();
        Ok(())
    }
}
