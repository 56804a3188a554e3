//! Mock NASA API server
//!
//! Every success helper attaches an `X-RateLimit-Remaining` header the way
//! the real service does.

use std::collections::HashMap;

use nasa_shared_config::NasaConfig;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// API key handed out by [`MockNasaServer::config`]
pub const TEST_API_KEY: &str = "test-api-key";

const RATE_LIMIT_HEADER: &str = "X-RateLimit-Remaining";

/// Mock NASA API server for client tests
pub struct MockNasaServer {
    server: MockServer,
}

impl MockNasaServer {
    /// Start a new mock NASA server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> NasaConfig {
        NasaConfig::with_url(self.url()).with_api_key(TEST_API_KEY)
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    fn get(endpoint: &str) -> wiremock::MockBuilder {
        Mock::given(method("GET")).and(path(endpoint))
    }

    /// Mount a 200 JSON response with a rate-limit header
    pub async fn mock_json(&self, endpoint: &str, body: Value, remaining: u32) {
        Self::get(endpoint)
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(RATE_LIMIT_HEADER, remaining.to_string().as_str())
                    .set_body_json(body),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 JSON response without any rate-limit header
    pub async fn mock_json_without_rate_limit(&self, endpoint: &str, body: Value) {
        Self::get(endpoint)
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 response with an empty body
    pub async fn mock_empty(&self, endpoint: &str, remaining: u32) {
        Self::get(endpoint)
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(RATE_LIMIT_HEADER, remaining.to_string().as_str()),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 response whose body is not JSON
    pub async fn mock_text(&self, endpoint: &str, body: &str, remaining: u32) {
        Self::get(endpoint)
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(RATE_LIMIT_HEADER, remaining.to_string().as_str())
                    .set_body_string(body),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a 200 binary response (e.g. a PNG tile)
    pub async fn mock_bytes(&self, endpoint: &str, body: Vec<u8>, mime: &str, remaining: u32) {
        Self::get(endpoint)
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(RATE_LIMIT_HEADER, remaining.to_string().as_str())
                    .set_body_raw(body, mime),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount an error response in the API's JSON error shape
    pub async fn mock_failure(&self, endpoint: &str, status_code: u16) {
        Self::get(endpoint)
            .respond_with(
                ResponseTemplate::new(status_code).set_body_json(serde_json::json!({
                    "error": {
                        "code": status_code,
                        "message": "mock failure"
                    }
                })),
            )
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.requests().await.len()
    }

    /// Query parameters of the most recent request
    pub async fn last_query(&self) -> HashMap<String, String> {
        self.requests()
            .await
            .last()
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Path of the most recent request
    pub async fn last_path(&self) -> Option<String> {
        self.requests()
            .await
            .last()
            .map(|request| request.url.path().to_string())
    }
}
