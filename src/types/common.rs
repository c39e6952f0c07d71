//! Common domain types for the Bitfinex API.

use serde::{Deserialize, Serialize};

/// Order type for trading.
///
/// The `Exchange*` variants trade on the exchange wallet; the others trade
/// on margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order on the exchange wallet
    #[serde(rename = "EXCHANGE LIMIT")]
    ExchangeLimit,
    /// Market order on the exchange wallet
    #[serde(rename = "EXCHANGE MARKET")]
    ExchangeMarket,
    /// Stop order on the exchange wallet
    #[serde(rename = "EXCHANGE STOP")]
    ExchangeStop,
    /// Stop-limit order on the exchange wallet
    #[serde(rename = "EXCHANGE STOP LIMIT")]
    ExchangeStopLimit,
    /// Trailing stop order on the exchange wallet
    #[serde(rename = "EXCHANGE TRAILING STOP")]
    ExchangeTrailingStop,
    /// Fill-or-kill order on the exchange wallet
    #[serde(rename = "EXCHANGE FOK")]
    ExchangeFok,
    /// Immediate-or-cancel order on the exchange wallet
    #[serde(rename = "EXCHANGE IOC")]
    ExchangeIoc,
    /// Margin limit order
    #[serde(rename = "LIMIT")]
    Limit,
    /// Margin market order
    #[serde(rename = "MARKET")]
    Market,
    /// Margin stop order
    #[serde(rename = "STOP")]
    Stop,
    /// Margin stop-limit order
    #[serde(rename = "STOP LIMIT")]
    StopLimit,
    /// Margin trailing stop order
    #[serde(rename = "TRAILING STOP")]
    TrailingStop,
    /// Margin fill-or-kill order
    #[serde(rename = "FOK")]
    Fok,
    /// Margin immediate-or-cancel order
    #[serde(rename = "IOC")]
    Ioc,
}

impl OrderType {
    /// The wire name of this order type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::ExchangeLimit => "EXCHANGE LIMIT",
            OrderType::ExchangeMarket => "EXCHANGE MARKET",
            OrderType::ExchangeStop => "EXCHANGE STOP",
            OrderType::ExchangeStopLimit => "EXCHANGE STOP LIMIT",
            OrderType::ExchangeTrailingStop => "EXCHANGE TRAILING STOP",
            OrderType::ExchangeFok => "EXCHANGE FOK",
            OrderType::ExchangeIoc => "EXCHANGE IOC",
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::Stop => "STOP",
            OrderType::StopLimit => "STOP LIMIT",
            OrderType::TrailingStop => "TRAILING STOP",
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
        }
    }

    /// Check if the order trades on the exchange wallet.
    pub fn is_exchange(&self) -> bool {
        self.as_str().starts_with("EXCHANGE ")
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::ExchangeLimit).unwrap(),
            r#""EXCHANGE LIMIT""#
        );
        assert_eq!(serde_json::to_string(&OrderType::Ioc).unwrap(), r#""IOC""#);

        let parsed: OrderType = serde_json::from_str(r#""EXCHANGE TRAILING STOP""#).unwrap();
        assert_eq!(parsed, OrderType::ExchangeTrailingStop);
    }

    #[test]
    fn test_order_type_display_matches_serde() {
        for ty in [OrderType::StopLimit, OrderType::ExchangeMarket, OrderType::Fok] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty));
        }
        assert!(OrderType::ExchangeFok.is_exchange());
        assert!(!OrderType::Limit.is_exchange());
    }
}
