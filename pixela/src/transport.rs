//! Thin HTTP layer: one request in, response text out.
//!
//! Non-2xx statuses are not errors here. Pixela answers failures with a JSON
//! body carrying `isSuccess: false`, which the caller decodes like any other
//! response.

use crate::Error;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// Header carrying the user token on every request.
pub const HEADER_USER_TOKEN: &str = "X-USER-TOKEN";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pixela-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// # Errors
    /// Returns an error on network failure or if the body cannot be read.
    pub async fn get(&self, url: &str, token: &str) -> Result<String, Error> {
        self.send("GET", self.client.get(url), url, token).await
    }

    /// # Errors
    /// Returns an error on network failure or if the body cannot be read.
    pub async fn post(
        &self,
        url: &str,
        token: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<String, Error> {
        let builder = with_payload(self.client.post(url), payload);
        self.send("POST", builder, url, token).await
    }

    /// # Errors
    /// Returns an error on network failure or if the body cannot be read.
    pub async fn put(
        &self,
        url: &str,
        token: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<String, Error> {
        let builder = with_payload(self.client.put(url), payload);
        self.send("PUT", builder, url, token).await
    }

    /// # Errors
    /// Returns an error on network failure or if the body cannot be read.
    pub async fn delete(&self, url: &str, token: &str) -> Result<String, Error> {
        self.send("DELETE", self.client.delete(url), url, token).await
    }

    async fn send(
        &self,
        method: &str,
        builder: RequestBuilder,
        url: &str,
        token: &str,
    ) -> Result<String, Error> {
        debug!(method, url, "sending request");
        let response = builder.header(HEADER_USER_TOKEN, token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(method, url, status = status.as_u16(), body_len = body.len(), "received response");
        Ok(body)
    }
}

fn with_payload(builder: RequestBuilder, payload: Option<&serde_json::Value>) -> RequestBuilder {
    match payload {
        // `json` sets `Content-Type: application/json`
        Some(payload) => builder.json(payload),
        None => builder.header(reqwest::header::CONTENT_LENGTH, 0),
    }
}
