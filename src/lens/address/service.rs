//! Lookup service access
//!
//! [`GeoService`] is the seam between the address lens and the network.
//! [`HttpGeoService`] talks to an ipinfo-compatible IP lookup endpoint and a
//! Mapbox-compatible geocoding endpoint with blocking `ureq` calls.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use super::types::{Coordinate, FeatureCollection, IpLookupResponse};
use crate::config::AddrgenConfig;

const USER_AGENT: &str = concat!("addrgen/", env!("CARGO_PKG_VERSION"));

/// The three lookups the address pipeline needs
pub trait GeoService {
    /// Look up location information for an IP address
    fn lookup_ip(&self, ip: &str) -> Result<IpLookupResponse>;

    /// Forward-geocode a postal code, restricted to postcode features
    fn geocode_postcode(&self, postcode: &str) -> Result<FeatureCollection>;

    /// Reverse-geocode a coordinate, restricted to address features
    fn reverse_geocode(&self, coordinate: Coordinate, limit: usize) -> Result<FeatureCollection>;
}

/// URL and query parameters of one outgoing lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LookupRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
}

/// HTTP implementation of [`GeoService`]
pub struct HttpGeoService {
    agent: Agent,
    access_token: Option<String>,
    geocoding_url: String,
    ip_lookup_url: String,
    country: String,
}

impl HttpGeoService {
    /// Create a service from configuration; the access token is taken from it
    pub fn new(config: &AddrgenConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();
        Self::with_agent(config, agent)
    }

    /// Create a service that sends its requests through `agent`
    pub fn with_agent(config: &AddrgenConfig, agent: Agent) -> Self {
        Self {
            agent,
            access_token: config.access_token.clone(),
            geocoding_url: config.geocoding_url.clone(),
            ip_lookup_url: config.ip_lookup_url.clone(),
            country: config.country.clone(),
        }
    }

    fn token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| anyhow!("no access token configured for the geocoding service"))
    }

    /// `{ip_lookup_url}/{ip}/json`
    pub(crate) fn ip_lookup_request(&self, ip: &str) -> LookupRequest {
        LookupRequest {
            url: format!("{}/{}/json", self.ip_lookup_url, urlencoding::encode(ip)),
            query: Vec::new(),
        }
    }

    /// `{geocoding_url}/{postcode}.json`, postcode features in the configured country
    pub(crate) fn postcode_request(&self, postcode: &str) -> Result<LookupRequest> {
        Ok(LookupRequest {
            url: format!(
                "{}/{}.json",
                self.geocoding_url,
                urlencoding::encode(postcode)
            ),
            query: vec![
                ("access_token", self.token()?.to_string()),
                ("country", self.country.clone()),
                ("types", "postcode".to_string()),
            ],
        })
    }

    /// `{geocoding_url}/{lon},{lat}.json`, at most `limit` address features
    pub(crate) fn reverse_request(
        &self,
        coordinate: Coordinate,
        limit: usize,
    ) -> Result<LookupRequest> {
        Ok(LookupRequest {
            url: format!(
                "{}/{},{}.json",
                self.geocoding_url, coordinate.lon, coordinate.lat
            ),
            query: vec![
                ("access_token", self.token()?.to_string()),
                ("types", "address".to_string()),
                ("limit", limit.to_string()),
            ],
        })
    }

    fn get_json<T: DeserializeOwned>(&self, request: &LookupRequest) -> Result<T> {
        debug!("GET {}", request.url);

        let mut builder = self
            .agent
            .get(request.url.as_str())
            .header("User-Agent", USER_AGENT);
        for (key, value) in &request.query {
            builder = builder.query(*key, value.as_str());
        }

        let resp = builder.call()?.body_mut().read_json::<T>()?;
        Ok(resp)
    }
}

impl GeoService for HttpGeoService {
    fn lookup_ip(&self, ip: &str) -> Result<IpLookupResponse> {
        self.get_json(&self.ip_lookup_request(ip))
    }

    fn geocode_postcode(&self, postcode: &str) -> Result<FeatureCollection> {
        self.get_json(&self.postcode_request(postcode)?)
    }

    fn reverse_geocode(&self, coordinate: Coordinate, limit: usize) -> Result<FeatureCollection> {
        self.get_json(&self.reverse_request(coordinate, limit)?)
    }
}
