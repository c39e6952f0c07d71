//! Bitfinex v2 REST API client.
//!
//! The request pipeline runs in four steps:
//! - [`request`]: build the URL, body and `bfx-*` headers, signing with a fresh nonce
//! - [`transport`]: send once over HTTPS and stream the body into a [`BodySink`]
//! - [`response`]: parse the body as JSON
//! - [`BitfinexRestClient`]: tie the steps together and attach endpoint context to errors

mod client;
pub mod endpoints;
pub mod private;
pub mod public;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{BitfinexRestClient, BitfinexRestClientBuilder};
pub use request::{Method, Request, WireRequest};
pub use response::{Notification, NotificationStatus, decode};
pub use transport::{BodySink, BufferSink, RawResponse, Transport, TransportConfig};
