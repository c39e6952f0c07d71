//! Request construction: endpoint, method and body in, signed wire request out.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::auth::{Credentials, NonceProvider, sign_request};
use crate::error::BitfinexError;
use crate::rest::endpoints::is_authenticated;

/// Header carrying the request nonce.
pub const NONCE_HEADER: &str = "bfx-nonce";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "bfx-apikey";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "bfx-signature";

/// HTTP method supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET, never with a body
    Get,
    /// POST with a JSON body
    Post,
}

impl Method {
    /// The method as a `reqwest` method.
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A caller-level request: endpoint, method and optional serialized body.
///
/// Immutable once built. GET requests cannot carry a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    endpoint: String,
    method: Method,
    body: Option<String>,
}

impl Request {
    /// A GET request without a body.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Get,
            body: None,
        }
    }

    /// A POST request whose body is `body` serialized as compact JSON.
    pub fn post<B>(endpoint: impl Into<String>, body: &B) -> Result<Self, BitfinexError>
    where
        B: Serialize + ?Sized,
    {
        Ok(Self {
            endpoint: endpoint.into(),
            method: Method::Post,
            body: Some(serde_json::to_string(body)?),
        })
    }

    /// A POST request without a body.
    pub fn post_empty(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Post,
            body: None,
        }
    }

    /// Endpoint path relative to the base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Serialized body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// What the builder needs to sign a request.
#[derive(Clone, Copy)]
pub struct SigningContext<'a> {
    /// Credentials, if the client has any
    pub credentials: Option<&'a Credentials>,
    /// Nonce source shared by everything using the same API key
    pub nonce_provider: &'a dyn NonceProvider,
    /// Sign requests to public endpoints as well
    pub sign_public_requests: bool,
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// Endpoint the request was built for
    pub endpoint: String,
    /// HTTP method
    pub method: Method,
    /// Absolute URL: base URL followed by the endpoint
    pub url: Url,
    /// Headers in emission order
    pub headers: HeaderMap,
    /// Body bytes exactly as signed
    pub body: Option<String>,
    /// Nonce used for the signature, if the request was signed
    pub nonce: Option<u64>,
}

impl WireRequest {
    /// Assemble and sign a request.
    ///
    /// `base_url` must end with `/`. Authenticated endpoints require
    /// credentials; public endpoints are signed when credentials are present
    /// and `sign_public_requests` is set.
    pub fn build(
        base_url: &str,
        signing: SigningContext<'_>,
        request: &Request,
    ) -> Result<Self, BitfinexError> {
        let endpoint = request.endpoint();
        let url = Url::parse(&format!("{base_url}{endpoint}"))?;
        let body = request.body().unwrap_or_default();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let must_sign = is_authenticated(endpoint);
        let credentials = match signing.credentials {
            Some(creds) if must_sign || signing.sign_public_requests => Some(creds),
            None if must_sign => return Err(BitfinexError::MissingCredentials),
            _ => None,
        };

        let mut nonce = None;
        if let Some(creds) = credentials {
            let auth = sign_request(creds, signing.nonce_provider, endpoint, body);
            let api_key = HeaderValue::from_str(&creds.api_key).map_err(|_| {
                BitfinexError::Configuration(
                    "API key contains characters not allowed in a header".to_string(),
                )
            })?;

            let signature =
                HeaderValue::from_str(&auth.signature).expect("hex is a valid header value");

            headers.insert(HeaderName::from_static(NONCE_HEADER), HeaderValue::from(auth.nonce));
            headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
            headers.insert(HeaderName::from_static(SIGNATURE_HEADER), signature);
            nonce = Some(auth.nonce);
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            method: request.method(),
            url,
            headers,
            body: request.body().map(str::to_string),
            nonce,
        })
    }
}
