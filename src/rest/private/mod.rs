//! Authenticated REST API endpoints.
//!
//! These endpoints require API credentials to be configured on the client.

mod types;

pub use types::*;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::BitfinexError;
use crate::rest::BitfinexRestClient;
use crate::rest::endpoints::private;
use crate::rest::request::Request;
use crate::rest::response::{Notification, check_api_error};

impl BitfinexRestClient {
    /// Submit an order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitfinex_api_client::rest::BitfinexRestClient;
    /// use bitfinex_api_client::rest::private::SubmitOrderRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = BitfinexRestClient::from_env()?;
    ///     let request = SubmitOrderRequest::exchange_limit(
    ///         "tBTCUSD",
    ///         "0.1".parse()?,
    ///         "50000.0".parse()?,
    ///     );
    ///     let notification = client.submit_order(&request).await?;
    ///     println!("Order IDs: {:?}", notification.order_ids()?);
    ///     Ok(())
    /// }
    /// ```
    pub async fn submit_order(
        &self,
        request: &SubmitOrderRequest,
    ) -> Result<Notification, BitfinexError> {
        self.notification(Request::post(private::ORDER_SUBMIT, request)?)
            .await
    }

    /// Place an `EXCHANGE LIMIT` order.
    pub async fn place_order(
        &self,
        symbol: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Notification, BitfinexError> {
        self.submit_order(&SubmitOrderRequest::exchange_limit(symbol, amount, price))
            .await
    }

    /// Update an open order.
    pub async fn update_order(
        &self,
        request: &UpdateOrderRequest,
    ) -> Result<Notification, BitfinexError> {
        self.notification(Request::post(private::ORDER_UPDATE, request)?)
            .await
    }

    /// Cancel an open order.
    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<Notification, BitfinexError> {
        self.notification(Request::post(private::ORDER_CANCEL, request)?)
            .await
    }

    /// Get active positions.
    ///
    /// Returns the raw position arrays.
    pub async fn get_positions(&self) -> Result<Value, BitfinexError> {
        let value = self
            .request(&Request::post_empty(private::POSITIONS))
            .await?;
        check_api_error(value)
    }

    async fn notification(&self, request: Request) -> Result<Notification, BitfinexError> {
        let value = check_api_error(self.request(&request).await?)?;
        let notification = Notification::from_value(&value)?;
        match notification.api_error() {
            Some(error) => Err(BitfinexError::Api(error)),
            None => Ok(notification),
        }
    }
}
