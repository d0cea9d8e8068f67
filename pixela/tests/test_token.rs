mod common;

use common::mock_server::{PixelaMock, TEST_TOKEN};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_every_request_carries_user_token() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("graphs/get_graphs_valid.json").await;
    mock.mount_fixture("webhooks/get_webhooks_valid.json").await;

    let client = mock.client();
    client.get_graphs().await.unwrap();
    client.get_webhooks().await.unwrap();

    let requests = mock.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|request| request.headers.get("x-user-token").unwrap() == TEST_TOKEN));
}

#[tokio::test]
async fn test_set_token_replaces_auth_header() {
    let mock = PixelaMock::start().await;
    Mock::given(method("GET"))
        .and(header("X-USER-TOKEN", "new_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"graphs": []})))
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(header("X-USER-TOKEN", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"message": "Wrong token.", "isSuccess": false}),
        ))
        .mount(&mock.server)
        .await;

    let mut client = mock.client();
    let before = client.get_graphs().await.unwrap();
    assert_eq!(before.is_success, Some(false));

    client.set_token("new_token");
    client.get_graphs().await.unwrap();
    client.get_webhooks().await.unwrap();

    let requests = mock.server.received_requests().await.unwrap();
    let tokens: Vec<_> = requests
        .iter()
        .map(|request| request.headers.get("x-user-token").unwrap().to_str().unwrap())
        .collect();
    assert_eq!(tokens, vec![TEST_TOKEN, "new_token", "new_token"]);
}
