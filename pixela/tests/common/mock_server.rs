#![allow(dead_code)]

use pixela::PixelaClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{body_json, header, method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_USER: &str = "alice";
pub const TEST_TOKEN: &str = "test_token";

#[derive(Deserialize)]
pub struct Fixture {
    #[serde(rename = "_meta")]
    pub meta: Option<FixtureMeta>,
    pub request: FixtureRequest,
    pub response: FixtureResponse,
}

#[derive(Deserialize)]
pub struct FixtureMeta {
    pub query: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
pub struct FixtureRequest {
    pub method: String,
    pub path_pattern: String,
    /// Exact JSON body the request must carry
    pub body: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct FixtureResponse {
    pub status_code: u16,
    /// JSON bodies are sent as JSON; a string body is sent verbatim.
    pub body: serde_json::Value,
}

pub struct PixelaMock {
    pub server: MockServer,
}

impl PixelaMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    pub async fn mount_fixture(&self, fixture_path: &str) {
        let full_path = Self::fixtures_dir().join(fixture_path);

        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", full_path.display(), e));

        let fixture: Fixture = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", full_path.display(), e));

        let mut mock = Mock::given(method(fixture.request.method.as_str()))
            .and(path_regex(&fixture.request.path_pattern))
            .and(header("X-USER-TOKEN", TEST_TOKEN));

        if let Some(body) = &fixture.request.body {
            mock = mock.and(body_json(body));
        }

        if let Some(query) = fixture.meta.as_ref().and_then(|meta| meta.query.as_ref()) {
            for (key, value) in query {
                mock = mock.and(query_param(key.as_str(), value.as_str()));
            }
        }

        let template = ResponseTemplate::new(fixture.response.status_code);
        let template = match &fixture.response.body {
            serde_json::Value::String(text) => template.set_body_string(text.clone()),
            body => template.set_body_json(body),
        };

        mock.respond_with(template).mount(&self.server).await;
    }

    pub fn client(&self) -> PixelaClient {
        PixelaClient::new(TEST_USER, TEST_TOKEN)
            .unwrap()
            .with_base_url(self.server.uri())
    }
}
