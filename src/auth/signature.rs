//! HMAC-SHA384 signature generation for Bitfinex API authentication.
//!
//! Bitfinex authenticated endpoints require a signature computed as:
//! ```text
//! HEX(HMAC-SHA384("/v2/" + endpoint + nonce + body, api_secret))
//! ```
//!
//! The signature is sent in the `bfx-signature` header next to `bfx-nonce`
//! and `bfx-apikey`. The server rebuilds the payload byte for byte, so the
//! body signed here must be exactly the body that goes on the wire.

use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::auth::{Credentials, NonceProvider};

type HmacSha384 = Hmac<Sha384>;

/// Path prefix the server prepends to the endpoint when it rebuilds the payload.
pub const API_VERSION_PREFIX: &str = "/v2/";

/// Length of a hex-encoded HMAC-SHA384 digest.
pub const SIGNATURE_HEX_LEN: usize = 96;

/// The nonce and signature produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSignature {
    /// Nonce sent as `bfx-nonce`
    pub nonce: u64,
    /// Lowercase hex signature sent as `bfx-signature`
    pub signature: String,
}

/// Build the canonical signature payload.
///
/// `endpoint` must not carry the `/v2/` prefix; `body` is the exact request
/// body, or an empty string for requests without one.
pub fn signature_payload(endpoint: &str, nonce: u64, body: &str) -> String {
    format!("{API_VERSION_PREFIX}{endpoint}{nonce}{body}")
}

/// Sign a request payload for Bitfinex's authenticated API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `endpoint` - The endpoint path without version prefix (e.g., "auth/r/positions")
/// * `nonce` - The nonce value for this request
/// * `body` - The JSON body, or an empty string
///
/// # Returns
///
/// Lowercase hex HMAC-SHA384 signature, always 96 characters.
///
/// # Example
///
/// ```rust
/// use bitfinex_api_client::auth::{Credentials, sign_payload};
///
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_payload(&credentials, "auth/r/positions", 1700000000000, "");
/// assert_eq!(signature.len(), 96);
/// ```
pub fn sign_payload(credentials: &Credentials, endpoint: &str, nonce: u64, body: &str) -> String {
    let mut mac = HmacSha384::new_from_slice(credentials.expose_secret().as_bytes())
        .expect("HMAC can take any size");
    mac.update(signature_payload(endpoint, nonce, body).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Draw a fresh nonce and sign the request with it.
pub fn sign_request(
    credentials: &Credentials,
    nonce_provider: &dyn NonceProvider,
    endpoint: &str,
    body: &str,
) -> AuthSignature {
    let nonce = nonce_provider.next_nonce();
    AuthSignature {
        nonce,
        signature: sign_payload(credentials, endpoint, nonce, body),
    }
}
