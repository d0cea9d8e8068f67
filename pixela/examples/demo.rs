use pixela::types::{CreatePixel, PixelsQuery};
use pixela::{date_string, PixelaClient};
use std::env;
use time::OffsetDateTime;

#[tokio::main]
async fn main() {
    let username = env::var("PIXELA_USERNAME").expect("PIXELA_USERNAME environment variable not set");
    let token = env::var("PIXELA_TOKEN").expect("PIXELA_TOKEN environment variable not set");
    let graph = env::var("PIXELA_GRAPH").unwrap_or_else(|_| "test-graph".to_string());

    let client = PixelaClient::new(username, token).expect("failed to build client");
    match client.get_graphs().await {
        Ok(graphs) => println!("{graphs:#?}"),
        Err(e) => println!("{e:#?}"),
    }

    let today = date_string(OffsetDateTime::now_utc().date());
    let pixel = CreatePixel::new(today.clone(), 1);
    match client.create_pixel(&graph, &pixel).await {
        Ok(response) => println!("Added: {response:#?}"),
        Err(e) => println!("{e:#?}"),
    }

    match client
        .get_graph_pixels(&graph, &PixelsQuery::new().with_from(&today))
        .await
    {
        Ok(pixels) => println!("{pixels:#?}"),
        Err(e) => println!("{e:#?}"),
    }
}
