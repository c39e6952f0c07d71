//! Public REST API endpoints (no authentication required).

use serde_json::Value;

use crate::error::BitfinexError;
use crate::rest::BitfinexRestClient;
use crate::rest::endpoints::public;
use crate::rest::request::Request;
use crate::rest::response::check_api_error;

impl BitfinexRestClient {
    /// Get the full-precision order book for a symbol.
    ///
    /// Returns the raw book: an array of `[PRICE, COUNT, AMOUNT]` entries,
    /// bids with positive and asks with negative amounts.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitfinex_api_client::rest::BitfinexRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = BitfinexRestClient::builder().build()?;
    ///     let book = client.get_order_book("tBTCUSD").await?;
    ///     println!("{}", book);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_order_book(&self, symbol: &str) -> Result<Value, BitfinexError> {
        let value = self.request(&Request::get(public::book(symbol))).await?;
        check_api_error(value)
    }
}
