//! Shared test utilities for the NASA API client
//!
//! Provides [`MockNasaServer`], a [`wiremock::MockServer`] wrapper that
//! answers like api.nasa.gov, so client tests run without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use nasa_test_utils::MockNasaServer;
//!
//! #[tokio::test]
//! async fn test_with_mock() {
//!     let server = MockNasaServer::start().await;
//!     server.mock_json("/planetary/apod", serde_json::json!({"title": "M31"}), 42).await;
//!
//!     let mut client = NasaClient::from_config(&server.config()).unwrap();
//!     // ...
//! }
//! ```

mod nasa;

pub use nasa::{MockNasaServer, TEST_API_KEY};
