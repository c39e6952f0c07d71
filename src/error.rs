//! Error types for the Bitfinex client library.

use serde_json::Value;
use thiserror::Error;

/// The main error type for all Bitfinex client operations.
#[derive(Error, Debug)]
pub enum BitfinexError {
    /// Missing or invalid configuration (credentials, base URL, HTTP client setup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Authenticated endpoint called on a client without credentials
    #[error("Missing credentials: API key and secret required for authenticated endpoints")]
    MissingCredentials,

    /// The request never produced a usable HTTP response
    #[error("Transport error on {endpoint}: {source}")]
    Transport {
        /// Endpoint the request was sent to
        endpoint: String,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// The response body is not valid JSON
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint the response came from
        endpoint: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Bitfinex returned a well-formed error document
    #[error("Bitfinex API error: {0}")]
    Api(ApiError),

    /// JSON serialization error while building a request body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// A well-formed document that does not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures below the HTTP application layer.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed (DNS, connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// A middleware in the HTTP stack failed
    #[error("HTTP middleware failed: {0}")]
    Middleware(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// A response chunk would overflow the body buffer
    #[error("Response chunk of {chunk} bytes rejected: {buffered} bytes buffered, limit {limit}")]
    BodyOverflow {
        /// Bytes accumulated before the rejected chunk
        buffered: usize,
        /// Size of the rejected chunk
        chunk: usize,
        /// Maximum body size accepted by the sink
        limit: usize,
    },

    /// Non-2xx status whose body is not an exchange error document
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, lossily decoded
        body: String,
    },
}

impl TransportError {
    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }
}

impl From<reqwest_middleware::Error> for TransportError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => TransportError::Middleware(e.to_string()),
        }
    }
}

/// Bitfinex API error codes and messages.
///
/// These are errors returned by the Bitfinex API itself in the response body,
/// usually as `["error", 10100, "apikey: invalid"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric error code, when the exchange supplied one
    pub code: Option<i64>,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Recognize an exchange error document.
    ///
    /// Bitfinex reports errors either as a tagged array
    /// `["error", code, "message"]` or as an object with an `error` key.
    /// Returns `None` for any other document.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                if items.first().and_then(Value::as_str) != Some("error") {
                    return None;
                }
                let code = items.get(1).and_then(Value::as_i64);
                let message = items
                    .get(2)
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                Some(Self::new(code, message))
            }
            Value::Object(map) => {
                let error = map.get("error").filter(|e| !e.is_null())?;
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .or_else(|| error.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                let code = map.get("code").and_then(Value::as_i64);
                Some(Self::new(code, message))
            }
            _ => None,
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.code == Some(error_codes::RATE_LIMIT)
            || self.message.contains("ERR_RATE_LIMIT")
            || self.message.to_ascii_lowercase().contains("ratelimit")
    }

    /// Check if this is a nonce error.
    pub fn is_nonce_error(&self) -> bool {
        self.code == Some(error_codes::ERR_AUTH_NONCE) || self.message.contains("nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.message.contains("apikey: invalid")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.message.contains("invalid signature")
    }
}

/// Known Bitfinex numeric error codes.
pub mod error_codes {
    /// Unknown error
    pub const ERR_UNK: i64 = 10000;
    /// Generic error
    pub const ERR_GENERIC: i64 = 10001;
    /// Concurrency error
    pub const ERR_CONCURRENCY: i64 = 10008;
    /// Request parameters error
    pub const ERR_PARAMS: i64 = 10020;
    /// Configuration setup failed
    pub const ERR_CONF_FAIL: i64 = 10050;
    /// Failed authentication
    pub const ERR_AUTH_FAIL: i64 = 10100;
    /// Error in authentication request payload
    pub const ERR_AUTH_PAYLOAD: i64 = 10111;
    /// Error in authentication request signature
    pub const ERR_AUTH_SIG: i64 = 10112;
    /// Error in authentication request encryption
    pub const ERR_AUTH_HMAC: i64 = 10113;
    /// Error in authentication request nonce
    pub const ERR_AUTH_NONCE: i64 = 10114;
    /// Rate limit exceeded
    pub const RATE_LIMIT: i64 = 11010;
    /// Ready state
    pub const ERR_READY: i64 = 11000;
}
