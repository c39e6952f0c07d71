//! Authentication module for the Bitfinex API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA384 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{
    API_VERSION_PREFIX, AuthSignature, SIGNATURE_HEX_LEN, sign_payload, sign_request,
    signature_payload,
};
