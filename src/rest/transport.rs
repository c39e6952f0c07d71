//! HTTP transport: one network attempt per request, body streamed into a sink.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::error::{BitfinexError, TransportError};
use crate::rest::request::WireRequest;

/// Largest response body accepted by default.
pub const DEFAULT_MAX_BODY_BYTES: usize = i32::MAX as usize;

/// Default timeout for a full request round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Destination for response body chunks.
///
/// Implementations must reject a chunk they cannot take whole; accepting part
/// of it would hand the decoder a corrupted document.
pub trait BodySink {
    /// Append one chunk of the response body.
    fn write(&mut self, chunk: &[u8]) -> Result<(), TransportError>;
}

/// Compute the body length after appending a chunk.
///
/// Fails if the sum overflows `usize` or exceeds `limit`.
pub fn checked_body_len(buffered: usize, chunk: usize, limit: usize) -> Result<usize, TransportError> {
    buffered
        .checked_add(chunk)
        .filter(|total| *total <= limit)
        .ok_or(TransportError::BodyOverflow {
            buffered,
            chunk,
            limit,
        })
}

/// In-memory sink with a size limit.
#[derive(Debug, Clone)]
pub struct BufferSink {
    buf: Vec<u8>,
    limit: usize,
}

impl BufferSink {
    /// Create a sink with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_BODY_BYTES)
    }

    /// Create a sink that holds at most `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
        }
    }

    /// Bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take the accumulated body.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BodySink for BufferSink {
    fn write(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        checked_body_len(self.buf.len(), chunk.len(), self.limit)?;
        self.buf.extend_from_slice(chunk);
        Ok(())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Complete response body
    pub body: Vec<u8>,
}

/// Settings for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bound on a whole request, body included
    pub timeout: Duration,
    /// Skip TLS certificate verification (development only)
    pub danger_accept_invalid_certs: bool,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Largest response body accepted
    pub max_body_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
            user_agent: format!("bitfinex-api-client/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Sends wire requests and collects their bodies.
#[derive(Clone)]
pub struct Transport {
    http_client: ClientWithMiddleware,
    max_body_bytes: usize,
}

impl Transport {
    /// Build the HTTP stack for `config`.
    pub fn new(config: &TransportConfig) -> Result<Self, BitfinexError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| BitfinexError::Configuration("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, header_value);

        if config.danger_accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled; do not use in production");
        }

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(|e| BitfinexError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http_client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Send the request and buffer the whole body.
    pub async fn dispatch(&self, request: &WireRequest) -> Result<RawResponse, TransportError> {
        let mut sink = BufferSink::with_limit(self.max_body_bytes);
        let status = self.dispatch_into(request, &mut sink).await?;
        Ok(RawResponse {
            status,
            body: sink.into_inner(),
        })
    }

    /// Send the request and stream the body into `sink`.
    ///
    /// Returns the HTTP status once the body has been fully written.
    pub async fn dispatch_into<S>(
        &self,
        request: &WireRequest,
        sink: &mut S,
    ) -> Result<StatusCode, TransportError>
    where
        S: BodySink + ?Sized,
    {
        let mut builder = self
            .http_client
            .request(request.method.as_reqwest(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let mut response = builder.send().await?;
        let status = response.status();

        while let Some(chunk) = response.chunk().await? {
            sink.write(&chunk)?;
        }

        Ok(status)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
