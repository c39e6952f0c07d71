use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bitfinex_api_client::auth::{Credentials, StaticCredentials, sign_payload};
use bitfinex_api_client::error::{BitfinexError, TransportError};
use bitfinex_api_client::rest::{BitfinexRestClient, Request};

fn build_client(server: &MockServer) -> BitfinexRestClient {
    let credentials = Arc::new(StaticCredentials::new("test_key", "test_secret"));
    BitfinexRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build()
        .unwrap()
}

async fn mount_book(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/book/tBTCUSD/P0"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_order_book_signed_by_default() {
    let server = MockServer::start().await;
    let response = serde_json::json!([[50000.0, 2, 0.5], [50010.0, 1, -0.25]]);
    mount_book(&server, ResponseTemplate::new(200).set_body_json(response.clone())).await;

    let client = build_client(&server);
    let book = client.get_order_book("tBTCUSD").await.unwrap();
    assert_eq!(book, response);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let request = &received[0];
    assert!(request.body.is_empty());
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.headers["bfx-apikey"], "test_key");

    let nonce: u64 = request.headers["bfx-nonce"].to_str().unwrap().parse().unwrap();
    assert!(nonce > 0);
    let expected = sign_payload(
        &Credentials::new("test_key", "test_secret"),
        "book/tBTCUSD/P0",
        nonce,
        "",
    );
    assert_eq!(request.headers["bfx-signature"].to_str().unwrap(), expected);
}

#[tokio::test]
async fn test_get_order_book_unsigned_when_disabled() {
    let server = MockServer::start().await;
    mount_book(&server, ResponseTemplate::new(200).set_body_string("[]")).await;

    let client = BitfinexRestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_key", "test_secret")))
        .sign_public_requests(false)
        .build()
        .unwrap();
    client.get_order_book("tBTCUSD").await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("bfx-signature").is_none());
    assert!(received[0].headers.get("bfx-apikey").is_none());
}

#[tokio::test]
async fn test_public_request_without_credentials() {
    let server = MockServer::start().await;
    mount_book(&server, ResponseTemplate::new(200).set_body_string("[]")).await;

    let client = BitfinexRestClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();
    let book = client.get_order_book("tBTCUSD").await.unwrap();
    assert_eq!(book, serde_json::json!([]));
}

#[tokio::test]
async fn test_truncated_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_book(&server, ResponseTemplate::new(200).set_body_string("{")).await;

    let client = build_client(&server);
    let err = client.get_order_book("tBTCUSD").await.unwrap_err();
    match err {
        BitfinexError::Decode { endpoint, .. } => assert_eq!(endpoint, "book/tBTCUSD/P0"),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_document_on_500_is_api_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!(["error", 10020, "symbol: invalid"]);
    mount_book(&server, ResponseTemplate::new(500).set_body_json(response)).await;

    let client = build_client(&server);
    match client.get_order_book("tBTCUSD").await.unwrap_err() {
        BitfinexError::Api(api) => {
            assert_eq!(api.code, Some(10020));
            assert_eq!(api.message, "symbol: invalid");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_document_on_200_is_api_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!(["error", 10020, "symbol: invalid"]);
    mount_book(&server, ResponseTemplate::new(200).set_body_json(response.clone())).await;

    let client = build_client(&server);
    assert!(matches!(
        client.get_order_book("tBTCUSD").await,
        Err(BitfinexError::Api(_))
    ));

    // The raw request path leaves classification to the caller.
    let raw = client.request(&Request::get("book/tBTCUSD/P0")).await.unwrap();
    assert_eq!(raw, response);
}

#[tokio::test]
async fn test_non_json_error_status_is_transport_error() {
    let server = MockServer::start().await;
    mount_book(
        &server,
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    let client = build_client(&server);
    match client.get_order_book("tBTCUSD").await.unwrap_err() {
        BitfinexError::Transport {
            endpoint,
            source: TransportError::Status { status, body },
        } => {
            assert_eq!(endpoint, "book/tBTCUSD/P0");
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let server = MockServer::start().await;
    mount_book(
        &server,
        ResponseTemplate::new(200).set_body_string("[".repeat(64)),
    )
    .await;

    let client = BitfinexRestClient::builder()
        .base_url(server.uri())
        .max_body_bytes(16)
        .build()
        .unwrap();
    let err = client.get_order_book("tBTCUSD").await.unwrap_err();
    assert!(matches!(
        err,
        BitfinexError::Transport {
            source: TransportError::BodyOverflow { limit: 16, .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    mount_book(
        &server,
        ResponseTemplate::new(200)
            .set_body_string("[]")
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let client = BitfinexRestClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client.get_order_book("tBTCUSD").await.unwrap_err();
    assert!(matches!(
        err,
        BitfinexError::Transport {
            source: TransportError::Timeout,
            ..
        }
    ));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop a listener to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = BitfinexRestClient::builder()
        .base_url(format!("http://127.0.0.1:{port}/"))
        .build()
        .unwrap();

    let err = client.get_order_book("tBTCUSD").await.unwrap_err();
    assert!(matches!(
        err,
        BitfinexError::Transport {
            source: TransportError::Http(_),
            ..
        }
    ));
}
