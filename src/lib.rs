//! addrgeo - address geolocation hooks for business documents
//!
//! This library provides the hooks and shared types for the hookd and apply binaries.

pub mod config;
pub mod diagnostics;
pub mod hooks;
pub mod models;
pub mod nominatim;
pub mod states;

pub use config::Config;
pub use diagnostics::{DiagnosticLog, ErrorLog};
pub use hooks::{generate_point, AddressGeolocator, HookError, HookName, Hooks};
pub use models::AddressRecord;
pub use nominatim::{AddressLookup, NominatimClient};

use anyhow::{Context, Result};
use std::sync::Arc;

/// Hook runner wired against the configured Nominatim endpoint.
pub type NominatimHooks = Hooks<NominatimClient, Arc<ErrorLog>>;

/// Build the hook runner and its diagnostic log from configuration.
pub fn build_hooks(config: &Config) -> Result<(NominatimHooks, Arc<ErrorLog>)> {
    let client = NominatimClient::new(&config.lookup).context("Failed to create lookup client")?;
    let states = config.state_abbreviations()?;
    let log = Arc::new(ErrorLog::new(config.log.capacity));

    let geolocator = AddressGeolocator::new(client, states, log.clone());
    let hooks = match &config.hooks {
        Some(bindings) => Hooks::with_bindings(geolocator, bindings.clone()),
        None => Hooks::new(geolocator),
    };
    Ok((hooks, log))
}
