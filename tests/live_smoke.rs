use bitfinex_api_client::rest::BitfinexRestClient;

fn live_tests_enabled() -> bool {
    std::env::var("BITFINEX_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = BitfinexRestClient::builder()
        .sign_public_requests(false)
        .build()?;
    let book = client.get_order_book("tBTCUSD").await?;
    assert!(book.as_array().is_some_and(|entries| !entries.is_empty()));

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = match BitfinexRestClient::from_env() {
        Ok(client) => client,
        Err(_) => return Ok(()),
    };

    let positions = client.get_positions().await?;
    assert!(positions.is_array());

    Ok(())
}
