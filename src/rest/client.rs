//! Bitfinex REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::{CredentialsProvider, EnvCredentials, IncreasingNonce, NonceProvider};
use crate::error::{ApiError, BitfinexError, TransportError};
use crate::rest::endpoints::BITFINEX_BASE_URL;
use crate::rest::request::{Request, SigningContext, WireRequest};
use crate::rest::response::decode;
use crate::rest::transport::{Transport, TransportConfig};

/// The Bitfinex REST API client.
///
/// Every call builds one signed request, sends it once and decodes the body.
/// There are no retries. Clones share the nonce provider, so one client can be
/// used from many tasks.
///
/// # Example
///
/// ```rust,no_run
/// use bitfinex_api_client::rest::BitfinexRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Credentials from BITFINEX_API_KEY / BITFINEX_API_SECRET
///     let client = BitfinexRestClient::from_env()?;
///
///     let book = client.get_order_book("tBTCUSD").await?;
///     println!("Order book: {}", book);
///
///     Ok(())
/// }
/// ```
///
/// With explicit credentials:
///
/// ```rust,no_run
/// use bitfinex_api_client::auth::StaticCredentials;
/// use bitfinex_api_client::rest::BitfinexRestClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = BitfinexRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let positions = client.get_positions().await?;
///     println!("Positions: {}", positions);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitfinexRestClient {
    transport: Transport,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
    sign_public_requests: bool,
}

impl BitfinexRestClient {
    /// Create a new client builder.
    pub fn builder() -> BitfinexRestClientBuilder {
        BitfinexRestClientBuilder::new()
    }

    /// Create a client with credentials from `BITFINEX_API_KEY` and
    /// `BITFINEX_API_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`BitfinexError::Configuration`] if either variable is missing.
    pub fn from_env() -> Result<Self, BitfinexError> {
        let credentials = EnvCredentials::from_env()?;
        Self::builder().credentials(Arc::new(credentials)).build()
    }

    /// Base URL every endpoint is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the signed wire request without sending it.
    pub fn build_request(&self, request: &Request) -> Result<WireRequest, BitfinexError> {
        let signing = SigningContext {
            credentials: self.credentials.as_ref().map(|c| c.get_credentials()),
            nonce_provider: self.nonce_provider.as_ref(),
            sign_public_requests: self.sign_public_requests,
        };
        WireRequest::build(&self.base_url, signing, request)
    }

    /// Send a request and return the decoded document.
    ///
    /// A 2xx body is returned as-is, including exchange error documents; the
    /// caller decides what they mean. A non-2xx status fails with
    /// [`BitfinexError::Api`] when the body is an exchange error document, and
    /// with [`TransportError::Status`] otherwise.
    pub async fn request(&self, request: &Request) -> Result<Value, BitfinexError> {
        let wire = self.build_request(request)?;
        let endpoint = request.endpoint();

        tracing::debug!(
            method = %wire.method,
            endpoint,
            nonce = ?wire.nonce,
            "Sending Bitfinex request"
        );

        let response = self
            .transport
            .dispatch(&wire)
            .await
            .map_err(|source| transport_error(endpoint, source))?;

        if !response.status.is_success() {
            tracing::warn!(status = %response.status, endpoint, "Bitfinex request failed");
            if let Some(api_error) = decode(&response.body)
                .ok()
                .as_ref()
                .and_then(ApiError::from_value)
            {
                return Err(BitfinexError::Api(api_error));
            }
            return Err(transport_error(
                endpoint,
                TransportError::Status {
                    status: response.status.as_u16(),
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                },
            ));
        }

        decode(&response.body).map_err(|source| BitfinexError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn transport_error(endpoint: &str, source: TransportError) -> BitfinexError {
    BitfinexError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}

impl std::fmt::Debug for BitfinexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitfinexRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("sign_public_requests", &self.sign_public_requests)
            .finish()
    }
}

/// Builder for [`BitfinexRestClient`].
pub struct BitfinexRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    transport: TransportConfig,
    sign_public_requests: bool,
}

impl BitfinexRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BITFINEX_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            transport: TransportConfig::default(),
            sign_public_requests: true,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Clients built separately for the same API key must share one provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = user_agent.into();
        self
    }

    /// Set the timeout for a whole request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    /// Set the largest response body the client will buffer.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.transport.max_body_bytes = limit;
        self
    }

    /// Disable TLS certificate verification.
    ///
    /// For debugging against local proxies only. Never enable this in production.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.transport.danger_accept_invalid_certs = accept;
        self
    }

    /// Sign requests to public endpoints when credentials are available.
    ///
    /// Enabled by default. Authenticated endpoints are always signed.
    pub fn sign_public_requests(mut self, sign: bool) -> Self {
        self.sign_public_requests = sign;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`BitfinexError::Configuration`] for an invalid base URL or user
    /// agent, or if the HTTP client cannot be created.
    pub fn build(self) -> Result<BitfinexRestClient, BitfinexError> {
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| BitfinexError::Configuration(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BitfinexError::Configuration(format!(
                "base URL must be http or https: {base_url}"
            )));
        }

        let transport = Transport::new(&self.transport)?;

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(BitfinexRestClient {
            transport,
            base_url,
            credentials: self.credentials,
            nonce_provider,
            sign_public_requests: self.sign_public_requests,
        })
    }
}

impl Default for BitfinexRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
