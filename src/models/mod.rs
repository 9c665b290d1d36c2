//! Core data models for the address hooks.

pub mod feature;
pub mod record;

pub use feature::{Feature, FeatureCollection, Geometry, Properties};
pub use record::{backfill, is_present, AddressRecord, GeoPoint};
