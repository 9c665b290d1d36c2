//! United States state name → abbreviation table.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub const UNITED_STATES: &str = "United States";

const US_ALIASES: &[&str] = &["united states", "united states of america", "usa", "us"];

/// States, DC and the inhabited territories.
const US_STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
    ("District of Columbia", "DC"),
    ("American Samoa", "AS"),
    ("Guam", "GU"),
    ("Northern Mariana Islands", "MP"),
    ("Puerto Rico", "PR"),
    ("United States Virgin Islands", "VI"),
    ("U.S. Virgin Islands", "VI"),
];

/// Canonical country name.
///
/// Only the United States has aliases; other names are trimmed and kept.
pub fn normalize_country(country: &str) -> String {
    let trimmed = country.trim();
    if US_ALIASES.contains(&trimmed.to_lowercase().as_str()) {
        UNITED_STATES.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct StateRow {
    name: String,
    abbr: String,
}

/// Injectable name → abbreviation mapping for United States addresses.
///
/// Addresses in any other country are never abbreviated.
#[derive(Debug, Clone, Default)]
pub struct StateAbbreviations {
    /// lowercase name -> abbreviation
    by_name: HashMap<String, String>,
    /// uppercase abbreviation, for values that are already abbreviated
    by_abbr: HashMap<String, String>,
}

impl StateAbbreviations {
    /// Empty table: nothing gets abbreviated.
    pub fn new() -> Self {
        Self::default()
    }

    /// States, DC and territories.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, abbr) in US_STATES {
            table.insert(name, abbr);
        }
        table
    }

    pub fn insert(&mut self, name: &str, abbr: &str) {
        let abbr = abbr.trim().to_uppercase();
        self.by_name.insert(name.trim().to_lowercase(), abbr.clone());
        self.by_abbr.insert(abbr.clone(), abbr);
    }

    /// Load additional rows from a CSV file with header `name,abbr`.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        info!("Loading state abbreviations from {}", path.display());

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open state table: {}", path.display()))?;

        let mut count = 0;
        for row in reader.deserialize::<StateRow>() {
            let row = row.with_context(|| format!("Invalid row in {}", path.display()))?;
            if row.name.is_empty() || row.abbr.is_empty() {
                continue;
            }
            self.insert(&row.name, &row.abbr);
            count += 1;
        }

        info!("Loaded {} state abbreviations", count);
        Ok(count)
    }

    /// Abbreviation for a state name, if the table knows it.
    pub fn lookup(&self, state: &str) -> Option<&str> {
        let state = state.trim();
        self.by_name
            .get(&state.to_lowercase())
            .or_else(|| self.by_abbr.get(&state.to_uppercase()))
            .map(String::as_str)
    }

    /// Abbreviate a United States state when known; every other country,
    /// and unknown names, keep the name as given.
    pub fn abbreviate(&self, country: Option<&str>, state: &str) -> String {
        let is_us = country.is_some_and(|c| normalize_country(c) == UNITED_STATES);
        match self.lookup(state).filter(|_| is_us) {
            Some(abbr) => abbr.to_string(),
            None => {
                debug!(state, ?country, "State kept unabbreviated");
                state.to_string()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
