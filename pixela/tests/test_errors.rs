mod common;

use common::mock_server::PixelaMock;
use pixela::{Error, PixelaClient};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mock = PixelaMock::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock.server)
        .await;

    let client = mock.client();
    let result = client.get_graphs().await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_svg_is_not_decoded() {
    let mock = PixelaMock::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock.server)
        .await;

    let client = mock.client();
    let svg = client
        .get_graph_svg("reading", &pixela::types::SvgQuery::new())
        .await
        .unwrap();
    assert_eq!(svg, "not json");
}

#[tokio::test]
async fn test_connection_failure_is_an_http_error() {
    let client = PixelaClient::new("alice", "token")
        .unwrap()
        .with_base_url("http://127.0.0.1:1");
    let result = client.delete_user().await;
    assert!(matches!(result, Err(Error::Http(_))));
}
