//! Address lookup against a Nominatim-compatible search endpoint.

mod client;
mod response;

use std::future::Future;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::GeoPoint;

pub use client::{NominatimClient, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
pub use response::CandidateAddress;

/// First-match result of a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub point: GeoPoint,
    pub display_name: Option<String>,
    pub address: CandidateAddress,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("lookup service responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed lookup response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid {field} coordinate in lookup response: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("invalid lookup endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Free-text forward lookup returning at most one candidate.
pub trait AddressLookup: Send + Sync {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeResult>, LookupError>> + Send;
}
