//! GeoJSON-style feature payload stored on the `location` field.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub point_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: [f64; 2], // [lon, lat]
}

impl FeatureCollection {
    /// Collection holding a single point feature.
    pub fn single_point(point: GeoPoint) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features: vec![Feature {
                feature_type: "Feature".to_string(),
                properties: Properties {
                    point_type: "Point".to_string(),
                },
                geometry: Geometry {
                    geo_type: "Point".to_string(),
                    coordinates: [point.lon, point.lat],
                },
            }],
        }
    }
}

/// JSON text of the collection. Only strings and `f64`s are serialized, and
/// serde_json writes non-finite floats as `null`, so this never fails.
impl fmt::Display for FeatureCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_coordinates_serialize() {
        let payload = FeatureCollection::single_point(GeoPoint {
            lat: f64::NAN,
            lon: f64::INFINITY,
        });
        let text = payload.to_string();
        assert!(text.contains(r#""coordinates":[null,null]"#));
    }
}
