//! Shared configuration types for the NASA API client
//!
//! Keeps credential and host resolution out of the client crate so that
//! binaries and tests can build a [`NasaConfig`] from the environment, a
//! `.env` file, or by hand.

mod error;
mod nasa;

pub use error::{ConfigError, ConfigResult};
pub use nasa::{NasaConfig, DEFAULT_API_URL, DEMO_API_KEY};

use std::env;

/// Helper function to get an optional environment variable with a default
///
/// Unset and blank variables both yield the default.
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
