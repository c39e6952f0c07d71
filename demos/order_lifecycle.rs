//! Example: Full order lifecycle against the live exchange.
//!
//! Fetches the order book, places a limit order, moves its price, cancels it
//! and lists positions. Uses real funds: point it at a sub-account.
//!
//! Run with: cargo run --example order_lifecycle
//!
//! Requires `BITFINEX_API_KEY` and `BITFINEX_API_SECRET` (a `.env` file works).

use bitfinex_api_client::rest::BitfinexRestClient;
use bitfinex_api_client::rest::private::{CancelOrderRequest, UpdateOrderRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let client = BitfinexRestClient::from_env()?;

    let book = client.get_order_book("tBTCUSD").await?;
    println!("Orderbook: {}", serde_json::to_string_pretty(&book)?);

    let placed = client
        .place_order("tBTCUSD", "0.1".parse()?, "50000.0".parse()?)
        .await?;
    println!("New order: {} ({:?})", placed.text, placed.status);

    let order_id = *placed
        .order_ids()?
        .first()
        .ok_or("submit notification carried no order")?;

    let modified = client
        .update_order(&UpdateOrderRequest::new(order_id).price("51000".parse()?))
        .await?;
    println!("Modified order: {}", modified.text);

    let cancelled = client.cancel_order(&CancelOrderRequest::new(order_id)).await?;
    println!("Cancelled order: {}", cancelled.text);

    let positions = client.get_positions().await?;
    println!("Positions: {}", serde_json::to_string_pretty(&positions)?);

    Ok(())
}
