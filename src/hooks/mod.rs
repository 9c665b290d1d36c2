//! Document event hooks and their dispatch.
//!
//! The host calls a hook with a document and the event that fired; every hook
//! returns the (possibly mutated) document. Hooks bound to the same event run
//! in order, each one receiving the previous hook's output.

mod geolocate;
mod point;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info_span, Instrument};

use crate::diagnostics::DiagnosticLog;
use crate::models::AddressRecord;
use crate::nominatim::{AddressLookup, LookupError};

pub use geolocate::{AddressGeolocator, LOG_TITLE};
pub use point::generate_point;

pub const DEFAULT_EVENT: &str = "validate";

#[derive(Debug, Error)]
pub enum HookError {
    /// User-facing failure that aborts the save
    #[error("Geolocation failed: {0}")]
    Geolocation(LookupError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookName {
    GeolocateAddress,
    GeneratePoint,
}

impl HookName {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookName::GeolocateAddress => "geolocate_address",
            HookName::GeneratePoint => "generate_point",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "geolocate_address" => Some(HookName::GeolocateAddress),
            "generate_point" => Some(HookName::GeneratePoint),
            _ => None,
        }
    }
}

impl std::fmt::Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event name -> hooks bound to it.
pub fn default_bindings() -> HashMap<String, Vec<HookName>> {
    HashMap::from([(
        DEFAULT_EVENT.to_string(),
        vec![HookName::GeolocateAddress, HookName::GeneratePoint],
    )])
}

/// Runs hooks for host events.
pub struct Hooks<L, D> {
    geolocator: AddressGeolocator<L, D>,
    bindings: HashMap<String, Vec<HookName>>,
}

impl<L, D> Hooks<L, D>
where
    L: AddressLookup,
    D: DiagnosticLog,
{
    pub fn new(geolocator: AddressGeolocator<L, D>) -> Self {
        Self::with_bindings(geolocator, default_bindings())
    }

    pub fn with_bindings(
        geolocator: AddressGeolocator<L, D>,
        bindings: HashMap<String, Vec<HookName>>,
    ) -> Self {
        Self {
            geolocator,
            bindings,
        }
    }

    pub fn geolocator(&self) -> &AddressGeolocator<L, D> {
        &self.geolocator
    }

    /// Hooks bound to `event`, in run order.
    pub fn bound(&self, event: &str) -> &[HookName] {
        self.bindings.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Run a single hook for `event`.
    pub async fn call(
        &self,
        hook: HookName,
        record: AddressRecord,
        event: &str,
    ) -> Result<AddressRecord, HookError> {
        let span = info_span!("hook", hook = hook.as_str(), event);
        async {
            match hook {
                HookName::GeolocateAddress => self.geolocator.geolocate(record).await,
                HookName::GeneratePoint => Ok(generate_point(record)),
            }
        }
        .instrument(span)
        .await
    }

    /// Run every hook bound to `event`, stopping at the first error.
    pub async fn run(
        &self,
        event: &str,
        mut record: AddressRecord,
    ) -> Result<AddressRecord, HookError> {
        let hooks = self.bound(event);
        if hooks.is_empty() {
            debug!("No hooks bound to event '{}'", event);
        }
        for hook in hooks {
            record = self.call(*hook, record, event).await?;
        }
        Ok(record)
    }
}
