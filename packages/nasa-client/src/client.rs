//! NASA Open APIs client implementation

use std::fmt;

use bytes::Bytes;
use chrono::{Local, NaiveDate};
use nasa_shared_config::{NasaConfig, DEMO_API_KEY};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{NasaError, NasaResult};
use crate::params::{
    date_range_pairs, format_date, CmeQuery, EarthImageryQuery, EpicCollection, IpsQuery,
};

/// Response header carrying the remaining request quota
pub const RATE_LIMIT_HEADER: &str = "X-RateLimit-Remaining";

const USER_AGENT: &str = concat!("nasa-client/", env!("CARGO_PKG_VERSION"));

/// Which rate-limit counter a request updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quota {
    Shared,
    MarsWeather,
}

/// NASA Open APIs client
///
/// Each endpoint method sends exactly one GET request. On success the
/// `X-RateLimit-Remaining` header is recorded and the decoded body is
/// returned unchanged; any non-200 status becomes [`NasaError::HttpFailure`].
pub struct NasaClient {
    http_client: Client,
    config: NasaConfig,
    limit_remaining: Option<u32>,
    mars_weather_remaining: Option<u32>,
}

impl fmt::Debug for NasaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NasaClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.config.base_url)
            .field("limit_remaining", &self.limit_remaining)
            .field("mars_weather_remaining", &self.mars_weather_remaining)
            .finish()
    }
}

impl NasaClient {
    /// Create a client for `https://api.nasa.gov`
    ///
    /// Falls back to the shared `DEMO_KEY` credential when no key (or an
    /// empty one) is given. The demo key is rate limited far more
    /// aggressively than a registered key.
    ///
    /// # Errors
    /// Returns `NasaError::Transport` if the HTTP client cannot be built
    pub fn new(api_key: Option<&str>) -> NasaResult<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .unwrap_or(DEMO_API_KEY);
        let config = NasaConfig::default().with_api_key(api_key);
        Self::from_config(&config)
    }

    /// Create a client from configuration
    ///
    /// # Errors
    /// Returns `NasaError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: &NasaConfig) -> NasaResult<Self> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create a client with a custom HTTP client
    pub fn with_client(config: &NasaConfig, http_client: Client) -> Self {
        if config.is_demo_key() {
            warn!("Using NASA DEMO_KEY; requests are heavily rate limited");
        }

        Self {
            http_client,
            config: config.clone(),
            limit_remaining: None,
            mars_weather_remaining: None,
        }
    }

    /// Create a client from `NASA_API_KEY` / `NASA_API_URL`
    ///
    /// # Errors
    /// - `NasaError::Config` if `NASA_API_URL` is not a valid http(s) URL
    /// - `NasaError::Transport` if the HTTP client cannot be built
    pub fn from_env() -> NasaResult<Self> {
        let config = NasaConfig::from_env()?;
        Self::from_config(&config)
    }

    /// Remaining quota reported by the most recent successful call
    /// (every endpoint except Mars weather)
    pub fn limit_remaining(&self) -> Option<u32> {
        self.limit_remaining
    }

    /// Remaining quota reported by the most recent successful Mars weather call
    pub fn mars_weather_remaining(&self) -> Option<u32> {
        self.mars_weather_remaining
    }

    /// Get the configuration
    pub fn config(&self) -> &NasaConfig {
        &self.config
    }

    pub fn is_demo_key(&self) -> bool {
        self.config.is_demo_key()
    }

    /// Send a GET request and fail on anything but 200
    async fn send(&self, path: &str, params: &[(&'static str, String)]) -> NasaResult<Response> {
        let url = self.config.endpoint_url(path);
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push(("api_key", self.config.api_key.as_str()));
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(path, params = params.len(), "Sending NASA API request");

        let response = self.http_client.get(&url).query(&query).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            let url = response.url().to_string();
            warn!(status = status.as_u16(), %reason, path, "NASA API request failed");
            return Err(NasaError::HttpFailure {
                status: status.as_u16(),
                reason,
                url,
            });
        }

        Ok(response)
    }

    /// Parse the remaining-quota header, if present and numeric
    fn rate_limit_remaining(headers: &HeaderMap) -> Option<u32> {
        headers
            .get(RATE_LIMIT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok())
    }

    fn store_rate_limit(&mut self, quota: Quota, remaining: Option<u32>) {
        if remaining.is_none() {
            warn!(header = RATE_LIMIT_HEADER, "Response has no usable rate-limit header");
        }
        debug!(?quota, ?remaining, "Recorded rate limit");

        match quota {
            Quota::Shared => self.limit_remaining = remaining,
            Quota::MarsWeather => self.mars_weather_remaining = remaining,
        }
    }

    /// Request `path` and decode the JSON body
    ///
    /// With `empty_as_object`, an empty 200 body decodes to `{}`.
    async fn get_json(
        &mut self,
        quota: Quota,
        path: &str,
        params: &[(&'static str, String)],
        empty_as_object: bool,
    ) -> NasaResult<Value> {
        let response = self.send(path, params).await?;
        // Counter is stored only once the body has decoded
        let remaining = Self::rate_limit_remaining(response.headers());
        let text = response.text().await?;

        let value = if empty_as_object && text.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&text)?
        };

        self.store_rate_limit(quota, remaining);
        Ok(value)
    }

    /// Shared request path for the date-range-only DONKI endpoints
    async fn donki_request(
        &mut self,
        path: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        let params = date_range_pairs(start_date, end_date);
        self.get_json(Quota::Shared, path, &params, false).await
    }

    /// Astronomy Picture of the Day
    ///
    /// # Arguments
    /// * `date` - Picture date (default: today, decided by the API)
    /// * `hd` - Request the high-resolution image URL
    #[instrument(skip(self))]
    pub async fn picture_of_the_day(
        &mut self,
        date: Option<NaiveDate>,
        hd: bool,
    ) -> NasaResult<Value> {
        let mut params = Vec::new();
        if let Some(date) = date {
            params.push(("date", format_date(date)));
        }
        params.push(("hd", hd.to_string()));
        self.get_json(Quota::Shared, "/planetary/apod", &params, false)
            .await
    }

    /// InSight Mars weather service
    ///
    /// Updates [`mars_weather_remaining`](Self::mars_weather_remaining)
    /// instead of the shared counter.
    #[instrument(skip(self))]
    pub async fn mars_weather(&mut self) -> NasaResult<Value> {
        let params = [
            ("ver", "1.0".to_string()),
            ("feedtype", "json".to_string()),
        ];
        self.get_json(Quota::MarsWeather, "/insight_weather/", &params, false)
            .await
    }

    /// Near Earth Objects by closest approach date
    ///
    /// Unlike the other endpoints, a missing `start_date` is filled in
    /// client-side with today's local date.
    #[instrument(skip(self))]
    pub async fn asteroid_feed(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());
        let mut params = vec![("start_date", format_date(start_date))];
        if let Some(end) = end_date {
            params.push(("end_date", format_date(end)));
        }
        self.get_json(Quota::Shared, "/neo/rest/v1/feed", &params, false)
            .await
    }

    /// Look up one asteroid by its NASA JPL small body id, or browse the
    /// overall data set when no id is given
    #[instrument(skip(self))]
    pub async fn get_asteroids(&mut self, asteroid_id: Option<u64>) -> NasaResult<Value> {
        let path = match asteroid_id {
            Some(id) => format!("/neo/rest/v1/neo/{}", id),
            None => "/neo/rest/v1/neo/browse/".to_string(),
        };
        self.get_json(Quota::Shared, &path, &[], false).await
    }

    /// Objects on the Sentry impact-monitoring list
    ///
    /// # Arguments
    /// * `active` - Only objects still being monitored
    #[instrument(skip(self))]
    pub async fn neo_sentry(&mut self, active: bool) -> NasaResult<Value> {
        let params = [("is_active", active.to_string())];
        self.get_json(Quota::Shared, "/neo/rest/v1/neo/sentry", &params, false)
            .await
    }

    /// DONKI coronal mass ejection analyses
    ///
    /// # Errors
    /// - `NasaError::HttpFailure` - If the API returns a non-200 status
    /// - `NasaError::Transport` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn coronal_mass_ejection(&mut self, query: &CmeQuery) -> NasaResult<Value> {
        self.get_json(
            Quota::Shared,
            "/DONKI/CMEAnalysis",
            &query.query_pairs(),
            false,
        )
        .await
    }

    /// DONKI geomagnetic storms
    #[instrument(skip(self))]
    pub async fn geomagnetic_storm(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/GST", start_date, end_date).await
    }

    /// DONKI interplanetary shocks
    ///
    /// The API answers with an empty body when nothing matches; that is
    /// returned as an empty JSON object.
    #[instrument(skip(self))]
    pub async fn interplanetary_shock(&mut self, query: &IpsQuery) -> NasaResult<Value> {
        self.get_json(Quota::Shared, "/DONKI/IPS", &query.query_pairs(), true)
            .await
    }

    /// DONKI solar flares
    #[instrument(skip(self))]
    pub async fn solar_flare(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/FLR", start_date, end_date).await
    }

    /// DONKI solar energetic particle events
    #[instrument(skip(self))]
    pub async fn solar_energetic_particle(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/SEP", start_date, end_date).await
    }

    /// DONKI magnetopause crossings
    #[instrument(skip(self))]
    pub async fn magnetopause_crossing(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/MPC", start_date, end_date).await
    }

    /// DONKI radiation belt enhancements
    #[instrument(skip(self))]
    pub async fn radiation_belt_enhancement(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/RBE", start_date, end_date).await
    }

    /// DONKI high speed streams
    #[instrument(skip(self))]
    pub async fn high_speed_stream(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/HSS", start_date, end_date).await
    }

    /// DONKI WSA-Enlil solar wind simulations
    #[instrument(skip(self))]
    pub async fn wsa_enlil_simulation(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        self.donki_request("/DONKI/WSAEnlilSimulations", start_date, end_date)
            .await
    }

    /// EPIC full-disc Earth image metadata
    ///
    /// Without a date the most recent set of images is returned.
    #[instrument(skip(self))]
    pub async fn epic(
        &mut self,
        collection: EpicCollection,
        date: Option<NaiveDate>,
    ) -> NasaResult<Value> {
        let path = match date {
            Some(date) => format!("/EPIC/api/{}/date/{}", collection, format_date(date)),
            None => format!("/EPIC/api/{}", collection),
        };
        self.get_json(Quota::Shared, &path, &[], false).await
    }

    /// Landsat 8 image tile centred on a coordinate
    ///
    /// Returns the raw image bytes (PNG).
    ///
    /// # Errors
    /// - `NasaError::InvalidArgument` - If the coordinate or tile size is out of range
    /// - `NasaError::HttpFailure` - If the API returns a non-200 status
    /// - `NasaError::Transport` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn earth_imagery(&mut self, query: &EarthImageryQuery) -> NasaResult<Bytes> {
        query.validate()?;

        let response = self
            .send("/planetary/earth/imagery", &query.query_pairs())
            .await?;
        let remaining = Self::rate_limit_remaining(response.headers());
        let image = response.bytes().await?;

        debug!(bytes = image.len(), "Received Earth imagery");
        self.store_rate_limit(Quota::Shared, remaining);
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults_to_demo_key() {
        let client = NasaClient::new(None).unwrap();
        assert!(client.is_demo_key());
        assert_eq!(client.config().base_url, "https://api.nasa.gov");
        assert_eq!(client.limit_remaining(), None);
        assert_eq!(client.mars_weather_remaining(), None);
    }

    #[test]
    fn test_empty_key_falls_back_to_demo_key() {
        let client = NasaClient::new(Some("  ")).unwrap();
        assert!(client.is_demo_key());
    }

    #[test]
    fn test_client_keeps_given_key() {
        let client = NasaClient::new(Some("abc123")).unwrap();
        assert!(!client.is_demo_key());
    }

    #[test]
    fn test_client_debug_redacts_api_key() {
        let client = NasaClient::new(Some("secret_key")).unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_client_from_config() {
        let config = NasaConfig::with_url("http://localhost:8080").with_api_key("abc");
        let client = NasaClient::from_config(&config).unwrap();
        assert_eq!(client.config(), &config);
        assert!(!client.is_demo_key());
    }

    #[test]
    fn test_rate_limit_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_HEADER, "42".parse().unwrap());
        assert_eq!(NasaClient::rate_limit_remaining(&headers), Some(42));

        headers.insert(RATE_LIMIT_HEADER, "lots".parse().unwrap());
        assert_eq!(NasaClient::rate_limit_remaining(&headers), None);

        assert_eq!(NasaClient::rate_limit_remaining(&HeaderMap::new()), None);
    }
}
