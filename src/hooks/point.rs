//! Point payload generation.

use crate::models::{AddressRecord, FeatureCollection};

/// Store a single-point feature collection in `location` when both
/// coordinates are set; otherwise return the record untouched.
pub fn generate_point(mut record: AddressRecord) -> AddressRecord {
    if let Some(point) = record.coordinates() {
        record.location = Some(FeatureCollection::single_point(point).to_string());
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_point_coordinates_lon_first() {
        let record = AddressRecord {
            latitude: Some(40.0),
            longitude: Some(-75.0),
            ..Default::default()
        };
        let record = generate_point(record);

        let location: FeatureCollection =
            serde_json::from_str(record.location.as_deref().unwrap()).unwrap();
        assert_eq!(location.features.len(), 1);
        assert_eq!(location.features[0].geometry.coordinates, [-75.0, 40.0]);
    }

    #[test]
    fn test_point_payload_shape() {
        let record = AddressRecord {
            latitude: Some(52.52),
            longitude: Some(13.405),
            ..Default::default()
        };
        let record = generate_point(record);
        let value: Value = serde_json::from_str(record.location.as_deref().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"point_type": "Point"},
                    "geometry": {"type": "Point", "coordinates": [13.405, 52.52]}
                }]
            })
        );
    }

    #[test]
    fn test_missing_latitude_unchanged() {
        let record = AddressRecord {
            longitude: Some(-75.0),
            ..Default::default()
        };
        let out = generate_point(record.clone());
        assert_eq!(out, record);
        assert!(out.location.is_none());
    }

    #[test]
    fn test_existing_location_kept_without_coordinates() {
        let record = AddressRecord {
            location: Some("{}".into()),
            ..Default::default()
        };
        let out = generate_point(record);
        assert_eq!(out.location.as_deref(), Some("{}"));
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let record = AddressRecord {
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..Default::default()
        };
        let out = generate_point(record);
        assert!(out.location.is_some());
    }
}
