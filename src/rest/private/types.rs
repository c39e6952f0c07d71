//! Request types for authenticated endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::OrderType;

/// Submit order request.
///
/// Amounts are positive to buy and negative to sell. Decimals are sent as
/// JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOrderRequest {
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trading pair symbol (e.g. `tBTCUSD`).
    pub symbol: String,
    /// Order amount.
    pub amount: Decimal,
    /// Limit price; omitted for market orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<u64>,
    /// Group ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<u64>,
    /// Order flags (sum of flag values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

impl SubmitOrderRequest {
    /// Create a new order request.
    pub fn new(order_type: OrderType, symbol: impl Into<String>, amount: Decimal) -> Self {
        Self {
            order_type,
            symbol: symbol.into(),
            amount,
            price: None,
            cid: None,
            gid: None,
            flags: None,
        }
    }

    /// An `EXCHANGE LIMIT` order.
    pub fn exchange_limit(symbol: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self::new(OrderType::ExchangeLimit, symbol, amount).price(price)
    }

    /// Set the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the client order ID.
    pub fn cid(mut self, cid: u64) -> Self {
        self.cid = Some(cid);
        self
    }

    /// Set the group ID.
    pub fn gid(mut self, gid: u64) -> Self {
        self.gid = Some(gid);
        self
    }

    /// Set order flags.
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = Some(flags);
        self
    }
}

/// Update order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    /// Order ID.
    pub id: u64,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// New amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl UpdateOrderRequest {
    /// Create an update for an order.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            price: None,
            amount: None,
        }
    }

    /// Set the new price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the new amount.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Cancel order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// Order ID.
    pub id: u64,
}

impl CancelOrderRequest {
    /// Cancel the order with this ID.
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}
