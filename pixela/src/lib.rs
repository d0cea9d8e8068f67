pub mod endpoint;
pub mod transport;
pub mod types;

use crate::endpoint::{with_query, Endpoints, GraphDetail};
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT};
use crate::types::{
    ApiResponse, CreateGraph, CreatePixel, CreateUser, CreateWebhook, GraphList, GraphStats,
    Pixel, PixelList, PixelsQuery, SvgQuery, UpdateGraph, UpdatePixel, UpdateUser, WebhookCreated,
    WebhookList,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use time::macros::format_description;
use time::Date;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),
}

const PIXEL_DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    format_description!("[year][month][day]");

/// Formats a calendar date the way Pixela keys pixels (`yyyyMMdd`).
#[must_use]
pub fn date_string(date: Date) -> String {
    date.format(PIXEL_DATE_FORMAT).unwrap_or_default()
}

pub struct PixelaClient {
    transport: HttpTransport,
    endpoints: Endpoints,
    username: String,
    token: String,
}

impl PixelaClient {
    fn encode<U: serde::Serialize>(payload: &U) -> Result<serde_json::Value, Error> {
        serde_json::to_value(payload).map_err(Error::Encode)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str(body).map_err(Error::Decode)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let body = self.transport.get(url, &self.token).await?;
        Self::decode(&body)
    }

    async fn post<T, U>(&self, url: &str, payload: Option<&U>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        U: serde::Serialize,
    {
        let payload = payload.map(Self::encode).transpose()?;
        let body = self
            .transport
            .post(url, &self.token, payload.as_ref())
            .await?;
        Self::decode(&body)
    }

    async fn put<T, U>(&self, url: &str, payload: Option<&U>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        U: serde::Serialize,
    {
        let payload = payload.map(Self::encode).transpose()?;
        let body = self
            .transport
            .put(url, &self.token, payload.as_ref())
            .await?;
        Self::decode(&body)
    }

    async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let body = self.transport.delete(url, &self.token).await?;
        Self::decode(&body)
    }

    /// Creates a new `PixelaClient` for the given credentials against `https://pixe.la`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            transport: HttpTransport::new(DEFAULT_TIMEOUT)?,
            endpoints: Endpoints::default(),
            username: username.into(),
            token: token.into(),
        })
    }

    /// Points the client at a different host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.endpoints = Endpoints::new(base_url.as_ref());
        self
    }

    /// Replaces the request timeout (default 30 seconds).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.transport = HttpTransport::new(timeout)?;
        Ok(self)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Replaces the token sent with every subsequent request.
    ///
    /// This only changes the local credentials; use [`Self::update_user`] to
    /// rotate the token on the server.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Registers a new user. The payload carries its own username and token.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn create_user(&self, user: &CreateUser) -> Result<ApiResponse, Error> {
        self.post(&self.endpoints.users(), Some(user)).await
    }

    /// Changes the server-side token of the client's user.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn update_user(&self, update: &UpdateUser) -> Result<ApiResponse, Error> {
        self.put(&self.endpoints.user(&self.username), Some(update))
            .await
    }

    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn delete_user(&self) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoints.user(&self.username)).await
    }

    // -------------------------------------------------------------------------
    // Graphs
    // -------------------------------------------------------------------------

    /// Creates a new graph.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn create_graph(&self, graph: &CreateGraph) -> Result<ApiResponse, Error> {
        self.post(&self.endpoints.graphs(&self.username), Some(graph))
            .await
    }

    /// Retrieves all graph definitions of the user.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn get_graphs(&self) -> Result<GraphList, Error> {
        self.get(&self.endpoints.graphs(&self.username)).await
    }

    /// Retrieves the rendered graph as SVG markup, returned verbatim.
    ///
    /// # Arguments
    /// * `graph_id` - The graph identifier
    /// * `query` - Optional `date` (yyyyMMdd) and `mode`
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails.
    pub async fn get_graph_svg(&self, graph_id: &str, query: &SvgQuery) -> Result<String, Error> {
        let url = with_query(
            self.endpoints.graph(&self.username, graph_id),
            &[
                ("date", query.date.as_deref()),
                ("mode", query.mode.as_deref()),
            ],
        );
        self.transport.get(&url, &self.token).await
    }

    /// Retrieves the dates holding a pixel, optionally limited to a range.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn get_graph_pixels(
        &self,
        graph_id: &str,
        query: &PixelsQuery,
    ) -> Result<PixelList, Error> {
        let url = with_query(
            self.endpoints
                .graph_detail(&self.username, graph_id, GraphDetail::Pixels),
            &[
                ("from", query.from.as_deref()),
                ("to", query.to.as_deref()),
            ],
        );
        self.get(&url).await
    }

    /// Retrieves summary statistics of a graph.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn get_graph_stats(&self, graph_id: &str) -> Result<GraphStats, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Stats);
        self.get(&url).await
    }

    /// Updates a graph definition. Only fields set on `update` are sent.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn update_graph(
        &self,
        graph_id: &str,
        update: &UpdateGraph,
    ) -> Result<ApiResponse, Error> {
        self.put(&self.endpoints.graph(&self.username, graph_id), Some(update))
            .await
    }

    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn delete_graph(&self, graph_id: &str) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoints.graph(&self.username, graph_id))
            .await
    }

    // -------------------------------------------------------------------------
    // Pixels
    // -------------------------------------------------------------------------

    /// Records the quantity of a day.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn create_pixel(
        &self,
        graph_id: &str,
        pixel: &CreatePixel,
    ) -> Result<ApiResponse, Error> {
        self.post(&self.endpoints.graph(&self.username, graph_id), Some(pixel))
            .await
    }

    /// Retrieves the pixel of a day.
    ///
    /// # Arguments
    /// * `graph_id` - The graph identifier
    /// * `date` - The day, formatted yyyyMMdd
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn get_pixel(&self, graph_id: &str, date: &str) -> Result<Pixel, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Date(date));
        self.get(&url).await
    }

    /// Updates the pixel of a day. Only fields set on `update` are sent.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn update_pixel(
        &self,
        graph_id: &str,
        date: &str,
        update: &UpdatePixel,
    ) -> Result<ApiResponse, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Date(date));
        self.put(&url, Some(update)).await
    }

    /// Increments today's pixel by one unit (int) or 0.01 (float).
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn increment_pixel(&self, graph_id: &str) -> Result<ApiResponse, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Increment);
        self.put::<_, ()>(&url, None).await
    }

    /// Decrements today's pixel by one unit (int) or 0.01 (float).
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn decrement_pixel(&self, graph_id: &str) -> Result<ApiResponse, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Decrement);
        self.put::<_, ()>(&url, None).await
    }

    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn delete_pixel(&self, graph_id: &str, date: &str) -> Result<ApiResponse, Error> {
        let url = self
            .endpoints
            .graph_detail(&self.username, graph_id, GraphDetail::Date(date));
        self.delete(&url).await
    }

    // -------------------------------------------------------------------------
    // Webhooks
    // -------------------------------------------------------------------------

    /// Registers a webhook; the returned hash identifies it afterwards.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn create_webhook(&self, webhook: &CreateWebhook) -> Result<WebhookCreated, Error> {
        self.post(&self.endpoints.webhooks(&self.username), Some(webhook))
            .await
    }

    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn get_webhooks(&self) -> Result<WebhookList, Error> {
        self.get(&self.endpoints.webhooks(&self.username)).await
    }

    /// Fires a webhook. No request body is sent.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn invoke_webhook(&self, webhook_hash: &str) -> Result<ApiResponse, Error> {
        let url = self.endpoints.webhook(&self.username, webhook_hash);
        self.post::<_, ()>(&url, None).await
    }

    /// # Errors
    /// Returns an error if the HTTP request fails or response cannot be parsed.
    pub async fn delete_webhook(&self, webhook_hash: &str) -> Result<ApiResponse, Error> {
        self.delete(&self.endpoints.webhook(&self.username, webhook_hash))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::date_string;
    use time::macros::date;

    #[test]
    fn formats_dates_as_pixel_keys() {
        assert_eq!(date_string(date!(2021 - 01 - 02)), "20210102");
        assert_eq!(date_string(date!(1999 - 12 - 31)), "19991231");
    }
}
