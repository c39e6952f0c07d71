//! Example: Working with BitfinexError and ApiError.
//!
//! Run with: cargo run --example error_handling

use bitfinex_api_client::error::{ApiError, TransportError, error_codes};
use bitfinex_api_client::BitfinexError;

fn describe(err: &BitfinexError) -> String {
    match err {
        BitfinexError::Configuration(msg) => format!("fix the setup first: {msg}"),
        BitfinexError::Transport { endpoint, source } if source.is_timeout() => {
            format!("{endpoint} timed out; safe to check state and resend")
        }
        BitfinexError::Transport { endpoint, source } => format!("{endpoint} unreachable: {source}"),
        BitfinexError::Decode { endpoint, source } => format!("{endpoint} sent garbage: {source}"),
        BitfinexError::Api(api) if api.is_nonce_error() => {
            "nonce rejected; another client is using this API key".to_string()
        }
        BitfinexError::Api(api) => format!("exchange rejected the request: {api}"),
        other => other.to_string(),
    }
}

fn main() {
    let doc = serde_json::json!(["error", error_codes::ERR_AUTH_NONCE, "nonce: small"]);
    let api_error = ApiError::from_value(&doc).expect("error document");
    println!("API error: {}", api_error);
    println!("Is nonce error: {}", api_error.is_nonce_error());

    let errors = [
        BitfinexError::Api(api_error),
        BitfinexError::Transport {
            endpoint: "auth/w/order/submit".to_string(),
            source: TransportError::Timeout,
        },
        BitfinexError::Configuration("Environment variable BITFINEX_API_KEY not set".to_string()),
    ];
    for err in &errors {
        println!("{}", describe(err));
    }
}
