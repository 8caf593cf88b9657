//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints};
use crate::error::{RestError, RestResult};
use crate::types::{
    ApiResponse, DepositHistoryResponse, OpenOrdersResponse, OrderHistoryResponse,
    PaginationRequest, SentHistoryResponse, Ticker,
};
use coincheck_auth::{Credentials, RequestSigner};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://coincheck.com/api";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("coincheck-rest/", env!("CARGO_PKG_VERSION"));

/// Coincheck REST API client
///
/// Provides access to both public and private endpoints. The client is cheap
/// to clone and safe to share between tasks: it only holds immutable
/// credentials, the base URL and a `reqwest` handle.
///
/// # Example
///
/// ```no_run
/// use coincheck_rest::{CoincheckClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoincheckClient::new()?;
///     let ticker = client.ticker().await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CoincheckClient::with_credentials(creds)?;
///     let orders = auth_client.open_orders().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoincheckClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl CoincheckClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client with credentials read from `COINCHECK_API_KEY` and
    /// `COINCHECK_API_SECRET`
    pub fn from_env() -> RestResult<Self> {
        Self::with_credentials(Credentials::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RestError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RestError::InvalidUrl(format!(
                "{}: not a base URL",
                config.base_url
            )));
        }

        let http_client = match config.http_client {
            Some(client) => client,
            None => Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
                .build()?,
        };

        info!(base_url = %base_url, "Created Coincheck REST client");

        Ok(Self {
            http_client,
            base_url,
            credentials: config.credentials,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// API root every endpoint path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // Request construction
    // ========================================================================

    /// Resolve an endpoint path and query against the base URL
    ///
    /// The path is appended to the base URL's path. Query parameters are
    /// encoded with their keys sorted, so the URL that gets signed is the
    /// same regardless of the order callers list them in.
    pub fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> RestResult<Url> {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);

        let mut params = query.to_vec();
        params.sort_by(|a, b| a.0.cmp(b.0));

        if params.is_empty() {
            url.set_query(None);
        } else {
            let encoded = serde_urlencoded::to_string(&params)
                .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
            url.set_query(Some(&encoded));
        }

        Ok(url)
    }

    /// Build an unauthenticated request
    pub fn new_public_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<Request> {
        let url = self.endpoint_url(path, query)?;
        Ok(self.http_client.request(method, url).build()?)
    }

    /// Build a signed request
    ///
    /// A fresh nonce is generated and the signature covers the nonce, the
    /// final URL (including the query string) and the complete body.
    pub fn new_private_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> RestResult<Request> {
        let credentials = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        let url = self.endpoint_url(path, query)?;
        let body = body.unwrap_or_default();

        let signer = RequestSigner::new(credentials);
        let headers = signer.headers(url.as_str(), &body)?;

        let mut builder = self.http_client.request(method, url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if !body.is_empty() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        Ok(builder.build()?)
    }

    /// Dispatch a request
    pub async fn send(&self, request: Request) -> RestResult<Response> {
        debug!("{} {}", request.method(), request.url());
        Ok(self.http_client.execute(request).await?)
    }

    /// Read the whole body and parse it as JSON
    ///
    /// A body that does not parse is reported as [`RestError::Status`] when
    /// the HTTP status was not a success, otherwise as [`RestError::Decode`].
    pub async fn decode<T: DeserializeOwned>(response: Response) -> RestResult<T> {
        let status = response.status();
        let body = response.bytes().await?;
        Self::parse_body(status, &body)
    }

    fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> RestResult<T> {
        match serde_json::from_slice(body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(RestError::Status {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            }),
            Err(e) => Err(RestError::Decode(e)),
        }
    }

    /// Unauthenticated GET whose payload has no envelope
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let request = self.new_public_request(Method::GET, path, query)?;
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Signed GET whose payload is wrapped in the success/error envelope
    pub(crate) async fn get_private<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let request = self.new_private_request(Method::GET, path, query, None)?;
        let response = self.send(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Envelope first: the payload may be null or partial on failure.
        let envelope: ApiResponse = Self::parse_body(status, &body)?;
        envelope.into_result()?;
        Self::parse_body(status, &body)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get the latest ticker
    pub async fn ticker(&self) -> RestResult<Ticker> {
        self.market().ticker().await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(AccountEndpoints::new(self))
    }

    /// Get executed trades, optionally paginated
    pub async fn order_history(
        &self,
        page: Option<&PaginationRequest>,
    ) -> RestResult<OrderHistoryResponse> {
        self.account()?.order_history(page).await
    }

    /// Get open orders
    pub async fn open_orders(&self) -> RestResult<OpenOrdersResponse> {
        self.account()?.open_orders().await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(FundingEndpoints::new(self))
    }

    /// Get outgoing transfers for a currency
    pub async fn sent_history(&self, currency: &str) -> RestResult<SentHistoryResponse> {
        self.funding()?.sent_history(currency).await
    }

    /// Get incoming deposits for a currency
    pub async fn deposit_history(&self, currency: &str) -> RestResult<DepositHistoryResponse> {
        self.funding()?.deposit_history(currency).await
    }
}

impl std::fmt::Debug for CoincheckClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoincheckClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API root
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Pre-built transport; timeout and user agent are ignored when set
    pub http_client: Option<Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Point the client at another API root (e.g. a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use an existing `reqwest::Client` as transport
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}
