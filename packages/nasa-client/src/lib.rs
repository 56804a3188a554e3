//! NASA Open APIs client
//!
//! This crate wraps the endpoints of `https://api.nasa.gov` behind typed
//! async methods:
//! - Astronomy Picture of the Day, InSight Mars weather
//! - Near Earth Objects (feed, lookup/browse, Sentry)
//! - DONKI space weather events (CME, GST, IPS, FLR, SEP, MPC, RBE, HSS, WSA-Enlil)
//! - EPIC and Landsat Earth imagery
//!
//! Responses are returned as [`serde_json::Value`] exactly as the API sends
//! them. Enumerated parameters are validated before anything is sent.
//!
//! # Example
//!
//! ```rust,no_run
//! use nasa_client::{CmeCatalog, CmeQuery, NasaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = NasaClient::new(Some("your_api_key"))?;
//!
//! let apod = client.picture_of_the_day(None, true).await?;
//! println!("{}", apod["title"]);
//! println!("requests left: {:?}", client.limit_remaining());
//!
//! let query = CmeQuery {
//!     catalog: CmeCatalog::SwrcCatalog,
//!     ..CmeQuery::default()
//! };
//! let cmes = client.coronal_mass_ejection(&query).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Rate limits
//!
//! Every successful call records the `X-RateLimit-Remaining` header. Mars
//! weather has its own quota and counter; all other endpoints share one.
//! The fallback `DEMO_KEY` credential is limited far more aggressively than
//! a registered key.
//!
//! # Environment Variables
//!
//! - `NASA_API_KEY`: API key (optional, defaults to `DEMO_KEY`)
//! - `NASA_API_URL`: API host (optional, defaults to `https://api.nasa.gov`)

mod client;
mod error;
mod params;

pub use client::{NasaClient, RATE_LIMIT_HEADER};
pub use nasa_shared_config::{NasaConfig, DEMO_API_KEY};
pub use error::{NasaError, NasaResult};
pub use params::{
    parse_date, CmeCatalog, CmeQuery, EarthImageryQuery, EpicCollection, IpsCatalog, IpsLocation,
    IpsQuery, CME_CATALOGS, DATE_FORMAT, DEFAULT_EARTH_DIM, EPIC_COLLECTIONS, IPS_CATALOGS,
    IPS_LOCATIONS,
};
