//! Address back-fill from a forward geocoding lookup.

use tracing::{debug, info};

use super::HookError;
use crate::diagnostics::DiagnosticLog;
use crate::models::{backfill, is_present, AddressRecord};
use crate::nominatim::{AddressLookup, GeocodeResult};
use crate::states::StateAbbreviations;

pub const LOG_TITLE: &str = "Geolocation Error";

/// Fills coordinates and missing address parts of a record from the first
/// lookup candidate.
pub struct AddressGeolocator<L, D> {
    lookup: L,
    states: StateAbbreviations,
    log: D,
}

impl<L, D> AddressGeolocator<L, D>
where
    L: AddressLookup,
    D: DiagnosticLog,
{
    pub fn new(lookup: L, states: StateAbbreviations, log: D) -> Self {
        Self {
            lookup,
            states,
            log,
        }
    }

    pub fn log(&self) -> &D {
        &self.log
    }

    pub async fn geolocate(&self, mut record: AddressRecord) -> Result<AddressRecord, HookError> {
        let Some(query) = record.lookup_query() else {
            debug!("No address fields to geolocate");
            return Ok(record);
        };

        let results = match self.lookup.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                self.log.log_error(LOG_TITLE, &e.to_string());
                return Err(HookError::Geolocation(e));
            }
        };

        let Some(result) = results.into_iter().next() else {
            self.log.log_error(
                LOG_TITLE,
                &format!("No geolocation found for address: {}", query),
            );
            return Ok(record);
        };

        self.apply(&mut record, &result);
        info!(
            "Geolocated '{}' to ({}, {})",
            query, result.point.lat, result.point.lon
        );
        Ok(record)
    }

    fn apply(&self, record: &mut AddressRecord, result: &GeocodeResult) {
        let address = &result.address;

        record.latitude = Some(result.point.lat);
        record.longitude = Some(result.point.lon);

        backfill(&mut record.pincode, address.postcode.as_deref());
        // Country first: state abbreviation depends on it.
        backfill(&mut record.country, address.country.as_deref());

        if !is_present(&record.state) {
            if let Some(state) = address.state.as_deref().filter(|s| !s.is_empty()) {
                record.state = Some(self.states.abbreviate(record.country.as_deref(), state));
            }
        }

        backfill(&mut record.county, address.county.as_deref());
        backfill(&mut record.city, address.locality());
    }
}
