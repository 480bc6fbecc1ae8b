use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

async fn serving(at: &str, body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;
    server
}

fn fetcher() -> HttpImageFetcher {
    HttpImageFetcher::new(reqwest::Client::new(), Duration::from_secs(5))
}

#[tokio::test]
async fn body_within_limit_is_returned() {
    let server = serving("/cover.png", vec![7u8; 1024]).await;
    let bytes = fetcher()
        .with_max_bytes(1024)
        .fetch(&format!("{}/cover.png", server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes.len(), 1024);
    assert!(bytes.iter().all(|b| *b == 7));
}

#[tokio::test]
async fn oversized_body_is_a_network_failure() {
    let server = serving("/huge.png", vec![0u8; 4096]).await;
    let err = fetcher()
        .with_max_bytes(1024)
        .fetch(&format!("{}/huge.png", server.uri()))
        .await
        .unwrap_err();
    match err {
        ImageFailure::Network(msg) => assert!(msg.contains("1024 byte limit"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn blank_url_and_bad_status_are_reported() {
    assert_eq!(
        fetcher().fetch("  ").await.unwrap_err(),
        ImageFailure::MissingUrl
    );

    let server = MockServer::start().await;
    let err = fetcher()
        .fetch(&format!("{}/missing.png", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err, ImageFailure::Status(404));
}

#[test]
fn default_cap_is_applied() {
    let f = fetcher();
    assert_eq!(f.max_bytes, MAX_COVER_BYTES);
}
