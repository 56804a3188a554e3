//! Request parameter types for NASA API endpoints
//!
//! Enumerated parameters are modelled as enums whose accepted string forms
//! live in the `*_CATALOGS` / `*_LOCATIONS` / `*_COLLECTIONS` constant sets.
//! Parsing any other string yields [`NasaError::InvalidArgument`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NasaError, NasaResult};

/// Date format used by every NASA endpoint
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted values of the CME analysis `catalog` parameter
pub const CME_CATALOGS: &[&str] = &["ALL", "SWRC_CATALOG", "JANG_ET_AL_CATALOG"];

/// Accepted values of the interplanetary shock `catalog` parameter
pub const IPS_CATALOGS: &[&str] = &["ALL", "SWRC_CATALOG", "WINSLOW_MESSENGER_ICME_CATALOG"];

/// Accepted values of the interplanetary shock `location` parameter
pub const IPS_LOCATIONS: &[&str] = &["ALL", "Earth", "MESSENGER", "STEREO A", "STEREO B"];

/// Accepted EPIC image collections
pub const EPIC_COLLECTIONS: &[&str] = &["natural", "enhanced"];

const BOOLEAN: &str = "a boolean (true or false)";
const STRING: &str = "a string";
const INTEGER: &str = "a non-negative integer";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(param: &str, value: &str) -> NasaResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        NasaError::invalid_argument(param, format!("'{}' is not a YYYY-MM-DD date ({})", value, e))
    })
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Catalog filter for coronal mass ejection analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CmeCatalog {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "SWRC_CATALOG")]
    SwrcCatalog,
    #[serde(rename = "JANG_ET_AL_CATALOG")]
    JangEtAlCatalog,
}

impl CmeCatalog {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => CME_CATALOGS[0],
            Self::SwrcCatalog => CME_CATALOGS[1],
            Self::JangEtAlCatalog => CME_CATALOGS[2],
        }
    }
}

impl FromStr for CmeCatalog {
    type Err = NasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "SWRC_CATALOG" => Ok(Self::SwrcCatalog),
            "JANG_ET_AL_CATALOG" => Ok(Self::JangEtAlCatalog),
            other => Err(NasaError::not_one_of("catalog", other, CME_CATALOGS)),
        }
    }
}

/// Catalog filter for interplanetary shocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IpsCatalog {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "SWRC_CATALOG")]
    SwrcCatalog,
    #[serde(rename = "WINSLOW_MESSENGER_ICME_CATALOG")]
    WinslowMessengerIcmeCatalog,
}

impl IpsCatalog {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => IPS_CATALOGS[0],
            Self::SwrcCatalog => IPS_CATALOGS[1],
            Self::WinslowMessengerIcmeCatalog => IPS_CATALOGS[2],
        }
    }
}

impl FromStr for IpsCatalog {
    type Err = NasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "SWRC_CATALOG" => Ok(Self::SwrcCatalog),
            "WINSLOW_MESSENGER_ICME_CATALOG" => Ok(Self::WinslowMessengerIcmeCatalog),
            other => Err(NasaError::not_one_of("catalog", other, IPS_CATALOGS)),
        }
    }
}

/// Observation location for interplanetary shocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IpsLocation {
    #[default]
    #[serde(rename = "ALL")]
    All,
    Earth,
    #[serde(rename = "MESSENGER")]
    Messenger,
    #[serde(rename = "STEREO A")]
    StereoA,
    #[serde(rename = "STEREO B")]
    StereoB,
}

impl IpsLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => IPS_LOCATIONS[0],
            Self::Earth => IPS_LOCATIONS[1],
            Self::Messenger => IPS_LOCATIONS[2],
            Self::StereoA => IPS_LOCATIONS[3],
            Self::StereoB => IPS_LOCATIONS[4],
        }
    }
}

impl FromStr for IpsLocation {
    type Err = NasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "Earth" => Ok(Self::Earth),
            "MESSENGER" => Ok(Self::Messenger),
            "STEREO A" => Ok(Self::StereoA),
            "STEREO B" => Ok(Self::StereoB),
            other => Err(NasaError::not_one_of("location", other, IPS_LOCATIONS)),
        }
    }
}

/// EPIC imagery collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpicCollection {
    #[default]
    Natural,
    Enhanced,
}

impl EpicCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => EPIC_COLLECTIONS[0],
            Self::Enhanced => EPIC_COLLECTIONS[1],
        }
    }
}

impl FromStr for EpicCollection {
    type Err = NasaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "natural" => Ok(Self::Natural),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(NasaError::not_one_of("color", other, EPIC_COLLECTIONS)),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(CmeCatalog, IpsCatalog, IpsLocation, EpicCollection);

/// Options for the DONKI coronal mass ejection analysis endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CmeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only return the most accurate analysis per event
    pub accurate_only: bool,
    /// Lower speed limit (km/s)
    pub speed: Option<u32>,
    /// Only return complete entries
    pub complete_entry: bool,
    /// Lower half-angle limit (degrees)
    pub half_angle: u32,
    pub catalog: CmeCatalog,
    pub keyword: Option<String>,
}

impl Default for CmeQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            accurate_only: true,
            speed: None,
            complete_entry: true,
            half_angle: 0,
            catalog: CmeCatalog::All,
            keyword: None,
        }
    }
}

impl CmeQuery {
    /// Build options from a loosely typed JSON object
    ///
    /// Keys are the snake_case field names. Absent or `null` keys keep the
    /// default value.
    ///
    /// # Errors
    /// - `NasaError::TypeMismatch` if a value has the wrong JSON type
    /// - `NasaError::InvalidArgument` for unknown keys, bad dates, or a
    ///   catalog outside [`CME_CATALOGS`]
    pub fn from_json(value: &Value) -> NasaResult<Self> {
        let obj = as_object(value)?;
        reject_unknown_keys(
            obj,
            &[
                "start_date",
                "end_date",
                "accurate_only",
                "speed",
                "complete_entry",
                "half_angle",
                "catalog",
                "keyword",
            ],
        )?;

        let defaults = Self::default();
        Ok(Self {
            start_date: date_field(obj, "start_date")?,
            end_date: date_field(obj, "end_date")?,
            accurate_only: bool_field(obj, "accurate_only")?.unwrap_or(defaults.accurate_only),
            speed: u32_field(obj, "speed")?,
            complete_entry: bool_field(obj, "complete_entry")?.unwrap_or(defaults.complete_entry),
            half_angle: u32_field(obj, "half_angle")?.unwrap_or(defaults.half_angle),
            catalog: str_field(obj, "catalog")?
                .map(str::parse)
                .transpose()?
                .unwrap_or(defaults.catalog),
            keyword: str_field(obj, "keyword")?.map(str::to_string),
        })
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = date_range_pairs(self.start_date, self.end_date);
        pairs.push(("mostAccurateOnly", self.accurate_only.to_string()));
        pairs.push(("completeEntryOnly", self.complete_entry.to_string()));
        if let Some(speed) = self.speed {
            pairs.push(("speed", speed.to_string()));
        }
        pairs.push(("halfAngle", self.half_angle.to_string()));
        pairs.push(("catalog", self.catalog.as_str().to_string()));
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        pairs
    }
}

/// Options for the DONKI interplanetary shock endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: IpsLocation,
    pub catalog: IpsCatalog,
}

impl IpsQuery {
    /// Build options from a loosely typed JSON object
    ///
    /// # Errors
    /// - `NasaError::TypeMismatch` if a value has the wrong JSON type
    /// - `NasaError::InvalidArgument` for unknown keys, bad dates, or a
    ///   location/catalog outside its accepted set
    pub fn from_json(value: &Value) -> NasaResult<Self> {
        let obj = as_object(value)?;
        reject_unknown_keys(obj, &["start_date", "end_date", "location", "catalog"])?;

        Ok(Self {
            start_date: date_field(obj, "start_date")?,
            end_date: date_field(obj, "end_date")?,
            location: str_field(obj, "location")?
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            catalog: str_field(obj, "catalog")?
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = date_range_pairs(self.start_date, self.end_date);
        pairs.push(("location", self.location.as_str().to_string()));
        pairs.push(("catalog", self.catalog.as_str().to_string()));
        pairs
    }
}

/// Default width/height of an Earth imagery tile, in degrees
pub const DEFAULT_EARTH_DIM: f64 = 0.025;

/// Options for the Landsat Earth imagery endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EarthImageryQuery {
    pub lat: f64,
    pub lon: f64,
    pub dim: f64,
    pub date: Option<NaiveDate>,
    pub cloud_score: bool,
}

impl EarthImageryQuery {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            dim: DEFAULT_EARTH_DIM,
            date: None,
            cloud_score: false,
        }
    }

    pub(crate) fn validate(&self) -> NasaResult<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(NasaError::invalid_argument(
                "lat",
                format!("{} is outside [-90, 90]", self.lat),
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(NasaError::invalid_argument(
                "lon",
                format!("{} is outside [-180, 180]", self.lon),
            ));
        }
        if !self.dim.is_finite() || self.dim <= 0.0 {
            return Err(NasaError::invalid_argument(
                "dim",
                format!("{} must be a positive number of degrees", self.dim),
            ));
        }
        Ok(())
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("dim", self.dim.to_string()),
        ];
        if let Some(date) = self.date {
            pairs.push(("date", format_date(date)));
        }
        pairs.push(("cloud_score", self.cloud_score.to_string()));
        pairs
    }
}

/// `startDate`/`endDate` pairs shared by the DONKI endpoints
pub(crate) fn date_range_pairs(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(start) = start_date {
        pairs.push(("startDate", format_date(start)));
    }
    if let Some(end) = end_date {
        pairs.push(("endDate", format_date(end)));
    }
    pairs
}

fn as_object(value: &Value) -> NasaResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| NasaError::type_mismatch("params", "a JSON object"))
}

fn reject_unknown_keys(obj: &Map<String, Value>, known: &[&str]) -> NasaResult<()> {
    match obj.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(NasaError::not_one_of("params", key, known)),
        None => Ok(()),
    }
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> NasaResult<Option<bool>> {
    field(obj, key)
        .map(|v| v.as_bool().ok_or_else(|| NasaError::type_mismatch(key, BOOLEAN)))
        .transpose()
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> NasaResult<Option<&'a str>> {
    field(obj, key)
        .map(|v| v.as_str().ok_or_else(|| NasaError::type_mismatch(key, STRING)))
        .transpose()
}

fn u32_field(obj: &Map<String, Value>, key: &str) -> NasaResult<Option<u32>> {
    field(obj, key)
        .map(|v| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| NasaError::type_mismatch(key, INTEGER))
        })
        .transpose()
}

fn date_field(obj: &Map<String, Value>, key: &str) -> NasaResult<Option<NaiveDate>> {
    str_field(obj, key)?.map(|s| parse_date(key, s)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_enum_strings_match_constant_sets() {
        assert_eq!(CmeCatalog::JangEtAlCatalog.as_str(), "JANG_ET_AL_CATALOG");
        assert_eq!(IpsCatalog::WinslowMessengerIcmeCatalog.to_string(), "WINSLOW_MESSENGER_ICME_CATALOG");
        assert_eq!(IpsLocation::StereoA.as_str(), "STEREO A");
        assert_eq!(EpicCollection::Enhanced.as_str(), "enhanced");

        for value in CME_CATALOGS {
            assert_eq!(value.parse::<CmeCatalog>().unwrap().as_str(), *value);
        }
        for value in IPS_CATALOGS {
            assert_eq!(value.parse::<IpsCatalog>().unwrap().as_str(), *value);
        }
        for value in IPS_LOCATIONS {
            assert_eq!(value.parse::<IpsLocation>().unwrap().as_str(), *value);
        }
    }

    #[test]
    fn test_enums_serialize_as_api_strings() {
        assert_eq!(serde_json::to_value(IpsLocation::StereoA).unwrap(), json!("STEREO A"));
        assert_eq!(serde_json::to_value(CmeCatalog::All).unwrap(), json!("ALL"));
        assert_eq!(serde_json::to_value(EpicCollection::Natural).unwrap(), json!("natural"));

        let catalog: IpsCatalog = serde_json::from_value(json!("SWRC_CATALOG")).unwrap();
        assert_eq!(catalog, IpsCatalog::SwrcCatalog);
    }

    #[test]
    fn test_unknown_catalog_is_invalid_argument() {
        let err = "SWRC".parse::<CmeCatalog>().unwrap_err();
        assert_matches!(err, NasaError::InvalidArgument { ref param, ref message } => {
            assert_eq!(param, "catalog");
            assert!(message.contains("JANG_ET_AL_CATALOG"));
        });

        // JANG_ET_AL is a CME-only catalog
        assert_matches!(
            "JANG_ET_AL_CATALOG".parse::<IpsCatalog>(),
            Err(NasaError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_location_is_case_sensitive() {
        assert_matches!(
            "earth".parse::<IpsLocation>(),
            Err(NasaError::InvalidArgument { ref param, .. }) if param == "location"
        );
        assert_eq!("Earth".parse::<IpsLocation>().unwrap(), IpsLocation::Earth);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("date", "2020-02-29").unwrap();
        assert_eq!(format_date(date), "2020-02-29");
        assert_matches!(
            parse_date("date", "2021-02-29"),
            Err(NasaError::InvalidArgument { .. })
        );
        assert_matches!(
            parse_date("date", "29/02/2020"),
            Err(NasaError::InvalidArgument { .. })
        );
    }

    #[test]
    fn test_cme_defaults() {
        let query = CmeQuery::default();
        let pairs = query.query_pairs();
        assert!(pairs.contains(&("mostAccurateOnly", "true".to_string())));
        assert!(pairs.contains(&("completeEntryOnly", "true".to_string())));
        assert!(pairs.contains(&("halfAngle", "0".to_string())));
        assert!(pairs.contains(&("catalog", "ALL".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "speed" || *k == "keyword"));
        assert!(!pairs.iter().any(|(k, _)| *k == "startDate" || *k == "endDate"));
    }

    #[test]
    fn test_cme_from_json() {
        let query = CmeQuery::from_json(&json!({
            "start_date": "2017-01-03",
            "complete_entry": false,
            "speed": 500,
            "catalog": "SWRC_CATALOG",
            "keyword": "swpc_annex",
            "end_date": null
        }))
        .unwrap();

        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2017, 1, 3));
        assert_eq!(query.end_date, None);
        assert!(!query.complete_entry);
        assert!(query.accurate_only);
        assert_eq!(query.speed, Some(500));
        assert_eq!(query.catalog, CmeCatalog::SwrcCatalog);
        assert_eq!(query.keyword.as_deref(), Some("swpc_annex"));
    }

    #[test]
    fn test_cme_from_json_non_boolean_flag() {
        let err = CmeQuery::from_json(&json!({"complete_entry": "yes"})).unwrap_err();
        assert_matches!(err, NasaError::TypeMismatch { ref param, .. } if param == "complete_entry");

        assert_matches!(
            CmeQuery::from_json(&json!({"accurate_only": 1})),
            Err(NasaError::TypeMismatch { .. })
        );
    }

    #[test]
    fn test_cme_from_json_rejects_bad_input() {
        assert_matches!(
            CmeQuery::from_json(&json!({"catalog": "NOPE"})),
            Err(NasaError::InvalidArgument { .. })
        );
        assert_matches!(
            CmeQuery::from_json(&json!({"half_angle": -5})),
            Err(NasaError::TypeMismatch { .. })
        );
        assert_matches!(
            CmeQuery::from_json(&json!({"speeed": 5})),
            Err(NasaError::InvalidArgument { ref param, .. }) if param == "params"
        );
        assert_matches!(
            CmeQuery::from_json(&json!(["ALL"])),
            Err(NasaError::TypeMismatch { .. })
        );
    }

    #[test]
    fn test_ips_from_json() {
        let query = IpsQuery::from_json(&json!({"location": "STEREO B"})).unwrap();
        assert_eq!(query.location, IpsLocation::StereoB);
        assert_eq!(query.catalog, IpsCatalog::All);

        assert_matches!(
            IpsQuery::from_json(&json!({"location": "Mars"})),
            Err(NasaError::InvalidArgument { ref param, .. }) if param == "location"
        );
        assert_matches!(
            IpsQuery::from_json(&json!({"catalog": 3})),
            Err(NasaError::TypeMismatch { .. })
        );
    }

    #[test]
    fn test_earth_imagery_validation() {
        assert!(EarthImageryQuery::new(1.5, 100.75).validate().is_ok());
        assert_matches!(
            EarthImageryQuery::new(91.0, 0.0).validate(),
            Err(NasaError::InvalidArgument { ref param, .. }) if param == "lat"
        );
        assert_matches!(
            EarthImageryQuery::new(0.0, -180.5).validate(),
            Err(NasaError::InvalidArgument { ref param, .. }) if param == "lon"
        );
        let mut query = EarthImageryQuery::new(0.0, 0.0);
        query.dim = 0.0;
        assert_matches!(query.validate(), Err(NasaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_date_range_pairs_omit_unset() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1);
        let pairs = date_range_pairs(start, None);
        assert_eq!(pairs, vec![("startDate", "2016-01-01".to_string())]);
    }
}
