mod common;

use common::mock_server::PixelaMock;
use pixela::types::{CreatePixel, UpdatePixel};
use serde_json::json;

#[tokio::test]
async fn test_create_pixel_with_optional_data() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/create_pixel_valid.json").await;

    let client = mock.client();
    let pixel = CreatePixel::new("20210101", 5)
        .with_optional_data(&json!({"book": "Dune"}))
        .unwrap();
    let result = client.create_pixel("reading", &pixel).await.unwrap();
    assert!(result.is_success);
}

#[tokio::test]
async fn test_create_pixel_without_optional_data_omits_key() {
    let mock = PixelaMock::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Success.", "isSuccess": true})),
        )
        .mount(&mock.server)
        .await;

    let client = mock.client();
    let pixel = CreatePixel::new("20210102", 1.5);
    let result = client.create_pixel("reading", &pixel).await.unwrap();
    assert!(result.is_success);

    let requests = mock.server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"date": "20210102", "quantity": "1.5"}));
}

#[tokio::test]
async fn test_get_pixel_valid() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/get_pixel_valid.json").await;

    let client = mock.client();
    let pixel = client.get_pixel("reading", "20210101").await.unwrap();
    assert_eq!(pixel.quantity, "5");
    assert_eq!(
        pixel.optional_data_json().unwrap(),
        Some(json!({"book": "Dune"}))
    );
}

#[tokio::test]
async fn test_update_pixel_sends_sparse_payload() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/update_pixel_valid.json").await;

    let client = mock.client();
    let update = UpdatePixel::new().with_quantity(7);
    let result = client
        .update_pixel("reading", "20210101", &update)
        .await
        .unwrap();
    assert!(result.is_success);
}

#[tokio::test]
async fn test_increment_pixel_sends_empty_body() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/increment_pixel_valid.json").await;

    let client = mock.client();
    let result = client.increment_pixel("reading").await.unwrap();
    assert!(result.is_success);

    let requests = mock.server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_decrement_pixel_valid() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/decrement_pixel_valid.json").await;

    let client = mock.client();
    let result = client.decrement_pixel("reading").await.unwrap();
    assert!(result.is_success);
}

#[tokio::test]
async fn test_delete_pixel_valid() {
    let mock = PixelaMock::start().await;
    mock.mount_fixture("pixels/delete_pixel_valid.json").await;

    let client = mock.client();
    let result = client.delete_pixel("reading", "20210101").await.unwrap();
    assert!(result.is_success);
}
