//! Credential management for Bitfinex API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::BitfinexError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "BITFINEX_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BITFINEX_API_SECRET";

/// API credentials containing the key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier, sent as `bfx-apikey`)
    pub api_key: String,
    /// The API secret (private, used for signing)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `BITFINEX_API_KEY` and `BITFINEX_API_SECRET`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from default environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`BitfinexError::Configuration`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self, BitfinexError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Create credentials from custom environment variable names.
    ///
    /// # Errors
    ///
    /// Returns [`BitfinexError::Configuration`] if either variable is unset or empty.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, BitfinexError> {
        let api_key = read_var(key_var)?;
        let api_secret = read_var(secret_var)?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }

    /// Try to create credentials from default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

fn read_var(name: &str) -> Result<String, BitfinexError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(BitfinexError::Configuration(format!(
            "Environment variable {name} is empty"
        ))),
        Err(_) => Err(BitfinexError::Configuration(format!(
            "Environment variable {name} not set"
        ))),
    }
}
