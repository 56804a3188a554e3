//! NASA API configuration types

use std::fmt;

use url::Url;

use crate::{get_env_or_default, ConfigError, ConfigResult};

/// Public demonstration credential accepted by api.nasa.gov
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Production API host
pub const DEFAULT_API_URL: &str = "https://api.nasa.gov";

/// NASA API client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct NasaConfig {
    /// API key; `DEMO_KEY` when none is configured
    pub api_key: String,

    /// API host, without a trailing path
    pub base_url: String,
}

impl fmt::Debug for NasaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NasaConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NasaConfig {
    /// Load NASA configuration from environment variables
    ///
    /// - `NASA_API_KEY` (default `DEMO_KEY`)
    /// - `NASA_API_URL` (default `https://api.nasa.gov`)
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` if `NASA_API_URL` is not an http(s) URL
    pub fn from_env() -> ConfigResult<Self> {
        let base_url = get_env_or_default("NASA_API_URL", DEFAULT_API_URL);
        validate_url("NASA_API_URL", &base_url)?;

        Ok(Self {
            api_key: get_env_or_default("NASA_API_KEY", DEMO_API_KEY),
            base_url,
        })
    }

    /// Load a `.env` file (if any) and then read the environment
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Create a configuration with a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
            ..Self::default()
        }
    }

    /// Replace the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Whether the shared demonstration key is in use
    pub fn is_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }

    /// Full URL for an endpoint path such as `/DONKI/GST`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

fn validate_url(name: &str, value: &str) -> ConfigResult<()> {
    let parsed =
        Url::parse(value).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(
            name.to_string(),
            format!("unsupported scheme '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NasaConfig::default();
        assert_eq!(config.api_key, "DEMO_KEY");
        assert_eq!(config.base_url, "https://api.nasa.gov");
        assert!(config.is_demo_key());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = NasaConfig::default().with_api_key("secret_key");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_with_url() {
        let config = NasaConfig::with_url("http://127.0.0.1:9999").with_api_key("abc");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.api_key, "abc");
        assert!(!config.is_demo_key());
    }

    #[test]
    fn test_endpoint_url_with_trailing_slash() {
        let config = NasaConfig::with_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint_url("/planetary/apod"),
            "http://localhost:8080/planetary/apod"
        );
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["NASA_API_KEY", "NASA_API_URL"], || {
            let config = NasaConfig::from_env().unwrap();
            assert_eq!(config, NasaConfig::default());
        });
    }

    #[test]
    fn test_from_env_reads_key_and_url() {
        temp_env::with_vars(
            [
                ("NASA_API_KEY", Some("my-key")),
                ("NASA_API_URL", Some("http://localhost:3000")),
            ],
            || {
                let config = NasaConfig::from_env().unwrap();
                assert_eq!(config.api_key, "my-key");
                assert_eq!(config.base_url, "http://localhost:3000");
            },
        );
    }

    #[test]
    fn test_from_env_empty_key_uses_demo_key() {
        temp_env::with_vars(
            [("NASA_API_KEY", Some("")), ("NASA_API_URL", None::<&str>)],
            || {
                assert!(NasaConfig::from_env().unwrap().is_demo_key());
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_url() {
        temp_env::with_var("NASA_API_URL", Some("ftp://api.nasa.gov"), || {
            assert!(matches!(
                NasaConfig::from_env(),
                Err(ConfigError::InvalidUrl(_, _))
            ));
        });
        temp_env::with_var("NASA_API_URL", Some("not a url"), || {
            assert!(matches!(
                NasaConfig::from_env(),
                Err(ConfigError::InvalidUrl(_, _))
            ));
        });
    }
}
