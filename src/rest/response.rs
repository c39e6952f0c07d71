//! Response decoding.
//!
//! The decoder only guarantees the body is a well-formed JSON document.
//! Bitfinex answers with positional arrays whose layout depends on the
//! endpoint, so field extraction is left to the caller, with [`Notification`]
//! covering the write endpoints.

use serde_json::Value;

use crate::error::{ApiError, BitfinexError};

/// Parse a raw body as a JSON document.
///
/// Malformed or truncated input is an error; no partial document is returned.
pub fn decode(body: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Turn an exchange error document into [`BitfinexError::Api`].
pub fn check_api_error(value: Value) -> Result<Value, BitfinexError> {
    match ApiError::from_value(&value) {
        Some(error) => Err(BitfinexError::Api(error)),
        None => Ok(value),
    }
}

/// Outcome reported in a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The request was accepted
    Success,
    /// The request was rejected
    Error,
    /// The request failed while processing
    Failure,
    /// Informational message
    Info,
    /// Any status this client does not know
    Other(String),
}

impl NotificationStatus {
    fn parse(status: &str) -> Self {
        match status {
            "SUCCESS" => NotificationStatus::Success,
            "ERROR" => NotificationStatus::Error,
            "FAILURE" => NotificationStatus::Failure,
            "INFO" => NotificationStatus::Info,
            other => NotificationStatus::Other(other.to_string()),
        }
    }
}

/// A Bitfinex notification, the reply to order submit, update and cancel.
///
/// Wire layout: `[MTS, TYPE, MESSAGE_ID, null, DATA, CODE, STATUS, TEXT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Server timestamp in milliseconds
    pub mts: u64,
    /// Notification type (e.g. `on-req`, `ou-req`, `oc-req`)
    pub kind: String,
    /// Message ID, if any
    pub message_id: Option<i64>,
    /// Payload: one order array, or an array of order arrays
    pub data: Value,
    /// Work in progress code, if any
    pub code: Option<i64>,
    /// Outcome
    pub status: NotificationStatus,
    /// Human-readable text
    pub text: String,
}

impl Notification {
    /// Parse a notification document.
    pub fn from_value(value: &Value) -> Result<Self, BitfinexError> {
        let items = value
            .as_array()
            .filter(|items| items.len() >= 8)
            .ok_or_else(|| invalid("expected an 8-element notification array", value))?;

        let mts = items[0]
            .as_u64()
            .ok_or_else(|| invalid("notification timestamp is not an integer", value))?;
        let kind = items[1]
            .as_str()
            .ok_or_else(|| invalid("notification type is not a string", value))?;
        let status = items[6]
            .as_str()
            .ok_or_else(|| invalid("notification status is not a string", value))?;

        Ok(Self {
            mts,
            kind: kind.to_string(),
            message_id: items[2].as_i64(),
            data: items[4].clone(),
            code: items[5].as_i64(),
            status: NotificationStatus::parse(status),
            text: items[7].as_str().unwrap_or_default().to_string(),
        })
    }

    /// Check if the exchange accepted the request.
    pub fn is_success(&self) -> bool {
        self.status == NotificationStatus::Success
    }

    /// The rejection carried by an `ERROR` or `FAILURE` notification.
    pub fn api_error(&self) -> Option<ApiError> {
        match self.status {
            NotificationStatus::Error | NotificationStatus::Failure => {
                Some(ApiError::new(self.code, self.text.clone()))
            }
            _ => None,
        }
    }

    /// Order IDs carried in the payload.
    ///
    /// Handles both a single order array (update, cancel) and an array of
    /// order arrays (submit). The ID is the first field of an order array.
    pub fn order_ids(&self) -> Result<Vec<u64>, BitfinexError> {
        let data = self
            .data
            .as_array()
            .ok_or_else(|| invalid("notification payload is not an array", &self.data))?;

        let orders: Vec<&Value> = match data.first() {
            Some(Value::Array(_)) => data.iter().collect(),
            Some(_) => vec![&self.data],
            None => Vec::new(),
        };

        orders
            .into_iter()
            .map(|order| {
                order
                    .get(0)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| invalid("order array has no integer ID", order))
            })
            .collect()
    }
}

fn invalid(reason: &str, value: &Value) -> BitfinexError {
    BitfinexError::InvalidResponse(format!("{reason}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: u64) -> Value {
        json!([id, null, 1_700_000_000_123u64, "tBTCUSD", 1_700_000_000_000u64, 1_700_000_000_000u64,
            0.1, 0.1, "EXCHANGE LIMIT", null, null, null, 0, "ACTIVE", null, null, 50000, 0])
    }

    #[test]
    fn test_decode_valid_documents() {
        assert_eq!(decode(b"[1,2,3]").unwrap(), json!([1, 2, 3]));
        assert_eq!(decode(br#"{"a":"b"}"#).unwrap(), json!({"a": "b"}));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode(b"{").is_err());
        assert!(decode(b"[[50000,1,").is_err());
        assert!(decode(b"").is_err());
        assert!(decode(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_check_api_error() {
        let err = check_api_error(json!(["error", 10020, "symbol: invalid"])).unwrap_err();
        match err {
            BitfinexError::Api(api) => {
                assert_eq!(api.code, Some(10020));
                assert_eq!(api.message, "symbol: invalid");
            }
            _ => panic!("expected an API error"),
        }

        let book = json!([[50000, 1, 0.5]]);
        assert_eq!(check_api_error(book.clone()).unwrap(), book);
    }

    #[test]
    fn test_submit_notification_order_ids() {
        let doc = json!([1_700_000_000_000u64, "on-req", null, null, [order(1234), order(1235)],
            null, "SUCCESS", "Submitting 2 orders."]);
        let notification = Notification::from_value(&doc).unwrap();

        assert!(notification.is_success());
        assert_eq!(notification.kind, "on-req");
        assert_eq!(notification.order_ids().unwrap(), vec![1234, 1235]);
        assert!(notification.api_error().is_none());
    }

    #[test]
    fn test_cancel_notification_single_order() {
        let doc = json!([1_700_000_000_000u64, "oc-req", null, null, order(99), null, "SUCCESS",
            "Submitted for cancellation; waiting for confirmation (ID: 99)."]);
        let notification = Notification::from_value(&doc).unwrap();
        assert_eq!(notification.order_ids().unwrap(), vec![99]);
    }

    #[test]
    fn test_error_notification() {
        let doc = json!([1_700_000_000_000u64, "on-req", null, null, [], null, "ERROR",
            "Invalid order: minimum size for BTC/USD is 0.0001"]);
        let notification = Notification::from_value(&doc).unwrap();

        assert_eq!(notification.status, NotificationStatus::Error);
        assert!(notification.order_ids().unwrap().is_empty());
        let error = notification.api_error().unwrap();
        assert!(error.message.starts_with("Invalid order"));
    }

    #[test]
    fn test_notification_shape_mismatch() {
        assert!(matches!(
            Notification::from_value(&json!([[1, 2, 3]])),
            Err(BitfinexError::InvalidResponse(_))
        ));

        let doc = json!([1u64, "on-req", null, null, [["not-an-id"]], null, "SUCCESS", ""]);
        let notification = Notification::from_value(&doc).unwrap();
        assert!(matches!(
            notification.order_ids(),
            Err(BitfinexError::InvalidResponse(_))
        ));
    }
}
