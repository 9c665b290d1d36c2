//! Address document as handed over by the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Postal address document.
///
/// Only the fields the hooks read or write are typed; unset typed fields are
/// written back as `null`. Everything else the host sends is kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub address_line1: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub county: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Postal code
    #[serde(default)]
    pub pincode: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Serialized feature collection, see [`crate::hooks::generate_point`]
    #[serde(default)]
    pub location: Option<String>,

    /// Remaining document fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A text field counts as present when it is set and not the empty string.
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Set `field` to `value` unless the field is already present.
/// Returns whether the field was written.
pub fn backfill(field: &mut Option<String>, value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() && !is_present(field) => {
            *field = Some(v.to_string());
            true
        }
        _ => false,
    }
}

impl AddressRecord {
    /// Query fields in the order they are joined.
    pub fn query_parts(&self) -> [&Option<String>; 4] {
        [&self.address_line1, &self.city, &self.state, &self.country]
    }

    /// Free-text lookup query built from the present query fields,
    /// or `None` when there is nothing to look up.
    pub fn lookup_query(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .query_parts()
            .into_iter()
            .filter(|f| is_present(f))
            .filter_map(|f| f.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Both coordinates, when set.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_lookup_query_skips_empty_fields() {
        let record = AddressRecord {
            address_line1: Some("1 Main St".into()),
            city: Some(String::new()),
            country: Some("United States".into()),
            ..Default::default()
        };
        assert_eq!(
            record.lookup_query().as_deref(),
            Some("1 Main St, United States")
        );
    }

    #[test]
    fn test_lookup_query_fixed_order() {
        let record = AddressRecord {
            country: Some("Canada".into()),
            state: Some("Ontario".into()),
            city: Some("Toronto".into()),
            address_line1: Some("100 Queen St W".into()),
            ..Default::default()
        };
        assert_eq!(
            record.lookup_query().as_deref(),
            Some("100 Queen St W, Toronto, Ontario, Canada")
        );
    }

    #[test]
    fn test_lookup_query_ignores_non_query_fields() {
        let record = AddressRecord {
            pincode: Some("12345".into()),
            county: Some("Kings".into()),
            ..Default::default()
        };
        assert!(record.lookup_query().is_none());
    }

    #[test]
    fn test_backfill_keeps_existing() {
        let mut city = Some("Springfield".to_string());
        assert!(!backfill(&mut city, Some("Shelbyville")));
        assert_eq!(city.as_deref(), Some("Springfield"));

        let mut empty = Some(String::new());
        assert!(backfill(&mut empty, Some("Shelbyville")));
        assert_eq!(empty.as_deref(), Some("Shelbyville"));

        let mut unset = None;
        assert!(!backfill(&mut unset, Some("")));
        assert!(unset.is_none());
    }

    #[test]
    fn test_extra_fields_survive() {
        let doc = json!({
            "name": "ADDR-0001",
            "address_title": "Head Office",
            "city": "Berlin",
            "latitude": null,
        });
        let record: AddressRecord = serde_json::from_value(doc).unwrap();
        assert_eq!(record.city.as_deref(), Some("Berlin"));
        assert!(record.latitude.is_none());

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["name"], "ADDR-0001");
        assert_eq!(back["address_title"], "Head Office");
        assert_eq!(back.get("latitude"), Some(&Value::Null));
    }

    #[test]
    fn test_null_typed_fields_round_trip() {
        let doc = json!({"location": null, "pincode": null, "city": "Oslo"});
        let record: AddressRecord = serde_json::from_value(doc).unwrap();
        let back = serde_json::to_value(&record).unwrap();

        let obj = back.as_object().unwrap();
        assert_eq!(obj.get("location"), Some(&Value::Null));
        assert_eq!(obj.get("pincode"), Some(&Value::Null));
        assert_eq!(obj["city"], "Oslo");
        assert!(obj.get("extra").is_none());
    }

    #[test]
    fn test_coordinates_need_both() {
        let mut record = AddressRecord {
            latitude: Some(40.0),
            ..Default::default()
        };
        assert!(record.coordinates().is_none());
        record.longitude = Some(-75.0);
        assert_eq!(
            record.coordinates(),
            Some(GeoPoint {
                lat: 40.0,
                lon: -75.0
            })
        );
    }
}
