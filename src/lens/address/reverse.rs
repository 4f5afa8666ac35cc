//! Reverse geocoding: coordinate to an ordered list of street addresses.

use tracing::{debug, warn};

use super::service::GeoService;
use super::types::Coordinate;

pub struct ReverseGeocoder<'a> {
    service: &'a dyn GeoService,
    limit: usize,
}

impl<'a> ReverseGeocoder<'a> {
    pub fn new(service: &'a dyn GeoService, limit: usize) -> Self {
        Self { service, limit }
    }

    /// Addresses near `coordinate`, most relevant first, at most `limit` long.
    ///
    /// A failed lookup and a lookup with zero matches both come back as an
    /// empty list; only the log level tells them apart.
    pub fn addresses(&self, coordinate: Coordinate) -> Vec<String> {
        let collection = match self.service.reverse_geocode(coordinate, self.limit) {
            Ok(collection) => collection,
            Err(e) => {
                warn!("reverse geocoding {} failed: {}", coordinate, e);
                return Vec::new();
            }
        };

        let addresses: Vec<String> = collection
            .features
            .into_iter()
            .filter_map(|f| f.place_name)
            .filter(|name| !name.trim().is_empty())
            .take(self.limit)
            .collect();

        if addresses.is_empty() {
            debug!("reverse geocoding {} matched no addresses", coordinate);
        }
        addresses
    }
}
