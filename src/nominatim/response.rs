//! Wire format of the Nominatim `/search` endpoint (`format=json`).

use serde::{Deserialize, Serialize};

use super::{GeocodeResult, LookupError};
use crate::models::GeoPoint;

/// One search candidate. Coordinates are sent as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: CandidateAddress,
}

/// Structured address breakdown (`addressdetails=1`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
}

impl CandidateAddress {
    /// City, falling back to town and then village.
    pub fn locality(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .find(|s| !s.is_empty())
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, LookupError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LookupError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

impl Candidate {
    pub(crate) fn into_result(self) -> Result<GeocodeResult, LookupError> {
        let point = GeoPoint {
            lat: parse_coordinate("lat", &self.lat)?,
            lon: parse_coordinate("lon", &self.lon)?,
        };
        Ok(GeocodeResult {
            point,
            display_name: self.display_name,
            address: self.address,
        })
    }
}
