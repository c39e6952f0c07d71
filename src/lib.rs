//! # Bitfinex Client
//!
//! An async Rust client library for the Bitfinex v2 authenticated REST API.
//!
//! ## Features
//!
//! - HMAC-SHA384 request signing with strictly increasing nonces
//! - One network attempt per call, with a configurable timeout
//! - TLS certificate verification on by default
//! - Distinct errors for configuration, transport, decoding and exchange rejections
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitfinex_api_client::rest::BitfinexRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BitfinexRestClient::from_env()?;
//!     let notification = client
//!         .place_order("tBTCUSD", "0.1".parse()?, "50000.0".parse()?)
//!         .await?;
//!     println!("Order IDs: {:?}", notification.order_ids()?);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, BitfinexError, TransportError};
pub use types::common::OrderType;

/// Result type alias using BitfinexError
pub type Result<T> = std::result::Result<T, BitfinexError>;
