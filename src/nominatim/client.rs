//! Nominatim HTTP client.

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::response::Candidate;
use super::{AddressLookup, GeocodeResult, LookupError};
use crate::config::LookupConfig;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim's usage policy requires an identifying User-Agent. Deployments
/// should put their own contact address in `[lookup] user_agent`.
pub const DEFAULT_USER_AGENT: &str = "addrgeo/1.0 (address geolocation hooks)";

/// Single-request lookup client. No timeout, retry or caching.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: Url,
}

impl NominatimClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("addressdetails", "1");
        url
    }
}

impl AddressLookup for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, LookupError> {
        let url = self.search_url(query);
        debug!("Nominatim lookup: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status { status, body });
        }

        let candidates: Vec<Candidate> = serde_json::from_str(&body)?;
        debug!("Nominatim returned {} candidates", candidates.len());

        candidates
            .into_iter()
            .take(1)
            .map(Candidate::into_result)
            .collect()
    }
}
