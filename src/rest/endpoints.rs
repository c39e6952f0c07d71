//! Bitfinex REST API endpoint constants.
//!
//! Paths are relative to the base URL and carry no `/v2/` prefix; the signer
//! adds that prefix to the signature payload itself.

/// Base URL for the Bitfinex v2 REST API.
pub const BITFINEX_BASE_URL: &str = "https://api-pub.bitfinex.com/v2/";

/// Prefix shared by every authenticated endpoint.
pub const AUTH_PREFIX: &str = "auth/";

/// Public endpoints (no authentication required).
pub mod public {
    /// Full-precision order book for a symbol.
    pub fn book(symbol: &str) -> String {
        format!("book/{symbol}/P0")
    }
}

/// Authenticated endpoints.
pub mod private {
    /// Submit an order.
    pub const ORDER_SUBMIT: &str = "auth/w/order/submit";
    /// Update an existing order.
    pub const ORDER_UPDATE: &str = "auth/w/order/update";
    /// Cancel an order.
    pub const ORDER_CANCEL: &str = "auth/w/order/cancel";
    /// List active positions.
    pub const POSITIONS: &str = "auth/r/positions";
}

/// Check if an endpoint requires authentication.
pub fn is_authenticated(endpoint: &str) -> bool {
    endpoint.starts_with(AUTH_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_path() {
        assert_eq!(public::book("tBTCUSD"), "book/tBTCUSD/P0");
    }

    #[test]
    fn test_is_authenticated() {
        assert!(is_authenticated(private::POSITIONS));
        assert!(is_authenticated(private::ORDER_SUBMIT));
        assert!(!is_authenticated(&public::book("tETHUSD")));
    }
}
