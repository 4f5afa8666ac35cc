//! Input resolution: IP address or postal code to a single coordinate.

use rand::Rng;
use tracing::{debug, warn};

use super::service::GeoService;
use super::types::{AddressError, BoundingBox, Coordinate, InputMode};

/// Trim and validate raw input for the given mode.
///
/// Runs before any lookup so rejected input never reaches the network.
pub fn validate_input(mode: InputMode, raw: &str) -> Result<&str, AddressError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(AddressError::EmptyInput);
    }
    if mode == InputMode::Postal && !query.chars().all(|c| c.is_ascii_digit()) {
        return Err(AddressError::InvalidPostalCode);
    }
    Ok(query)
}

/// Pick a uniformly random point inside a bounding box (inclusive).
///
/// A postal code covers an area rather than a point, so the coordinate is
/// spread across the box instead of pinned to its centre.
pub fn sample_in_bbox<R: Rng + ?Sized>(bbox: &BoundingBox, rng: &mut R) -> Coordinate {
    let lon = rng.random_range(bbox.min_lon..=bbox.max_lon);
    let lat = rng.random_range(bbox.min_lat..=bbox.max_lat);
    Coordinate::new(lon, lat)
}

/// Resolves validated input to a coordinate through a [`GeoService`]
pub struct Resolver<'a> {
    service: &'a dyn GeoService,
}

impl<'a> Resolver<'a> {
    pub fn new(service: &'a dyn GeoService) -> Self {
        Self { service }
    }

    /// Validate and resolve raw input, sampling postal codes with the thread RNG
    pub fn resolve(&self, mode: InputMode, raw: &str) -> Result<Coordinate, AddressError> {
        self.resolve_with_rng(mode, raw, &mut rand::rng())
    }

    /// Validate and resolve raw input with a caller-supplied RNG
    pub fn resolve_with_rng<R: Rng + ?Sized>(
        &self,
        mode: InputMode,
        raw: &str,
        rng: &mut R,
    ) -> Result<Coordinate, AddressError> {
        let query = validate_input(mode, raw)?;
        let coordinate = match mode {
            InputMode::Ip => self.ip_to_coordinate(query),
            InputMode::Postal => self.postal_to_coordinate(query, rng),
        };
        coordinate.ok_or(AddressError::Unresolved)
    }

    fn ip_to_coordinate(&self, ip: &str) -> Option<Coordinate> {
        let resp = match self.service.lookup_ip(ip) {
            Ok(resp) => resp,
            Err(e) => {
                warn!("IP lookup for {} failed: {}", ip, e);
                return None;
            }
        };

        let Some(loc) = resp.loc.as_deref() else {
            debug!("IP lookup for {} returned no location", ip);
            return None;
        };

        let coordinate = Coordinate::from_lat_lon_str(loc);
        if coordinate.is_none() {
            warn!("IP lookup for {} returned malformed location {:?}", ip, loc);
        }
        coordinate
    }

    fn postal_to_coordinate<R: Rng + ?Sized>(
        &self,
        postcode: &str,
        rng: &mut R,
    ) -> Option<Coordinate> {
        let collection = match self.service.geocode_postcode(postcode) {
            Ok(collection) => collection,
            Err(e) => {
                warn!("postal code lookup for {} failed: {}", postcode, e);
                return None;
            }
        };

        let Some(feature) = collection.features.first() else {
            debug!("postal code {} matched no features", postcode);
            return None;
        };

        let bbox = match feature.bbox.as_deref().map(BoundingBox::from_slice) {
            Some(Some(bbox)) => bbox,
            Some(None) => {
                warn!(
                    "postal code {} has a malformed bounding box {:?}",
                    postcode, feature.bbox
                );
                return None;
            }
            None => {
                debug!("postal code {} has no bounding box", postcode);
                return None;
            }
        };

        Some(sample_in_bbox(&bbox, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::address::tests_support::MockGeoService;
    use crate::lens::address::types::{Feature, FeatureCollection};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn postcode_feature(bbox: Option<Vec<f64>>) -> FeatureCollection {
        FeatureCollection {
            features: vec![Feature {
                place_name: Some("90210, Beverly Hills, California, United States".to_string()),
                bbox,
            }],
        }
    }

    #[test]
    fn test_validate_input() {
        assert_eq!(validate_input(InputMode::Ip, " 8.8.8.8 "), Ok("8.8.8.8"));
        assert_eq!(validate_input(InputMode::Postal, "02134"), Ok("02134"));
        assert_eq!(
            validate_input(InputMode::Ip, "   "),
            Err(AddressError::EmptyInput)
        );
        assert_eq!(
            validate_input(InputMode::Postal, ""),
            Err(AddressError::EmptyInput)
        );
        assert_eq!(
            validate_input(InputMode::Postal, "ABCDE"),
            Err(AddressError::InvalidPostalCode)
        );
        assert_eq!(
            validate_input(InputMode::Postal, "12-345"),
            Err(AddressError::InvalidPostalCode)
        );
        // ip mode passes the literal input through
        assert_eq!(validate_input(InputMode::Ip, "not-an-ip"), Ok("not-an-ip"));
    }

    #[test]
    fn test_sample_stays_inside_bbox() {
        let mut rng = StdRng::seed_from_u64(7);
        let boxes = [
            BoundingBox::from_slice(&[-118.43, 34.06, -118.38, 34.13]).unwrap(),
            BoundingBox::from_slice(&[-0.5, -0.5, 0.5, 0.5]).unwrap(),
            BoundingBox::from_slice(&[10.0, 20.0, 10.0, 20.0]).unwrap(),
        ];
        for bbox in &boxes {
            for _ in 0..500 {
                let c = sample_in_bbox(bbox, &mut rng);
                assert!(bbox.contains(&c), "{:?} outside {:?}", c, bbox);
            }
        }
    }

    #[test]
    fn test_sample_is_not_centroid() {
        let mut rng = StdRng::seed_from_u64(42);
        let bbox = BoundingBox::from_slice(&[0.0, 0.0, 1.0, 1.0]).unwrap();
        let samples: Vec<Coordinate> = (0..20).map(|_| sample_in_bbox(&bbox, &mut rng)).collect();
        assert!(samples.iter().any(|c| *c != samples[0]));
    }

    #[test]
    fn test_resolve_ip() {
        let service = MockGeoService::new().with_ip_loc("37.4,-122.1");
        let resolver = Resolver::new(&service);

        let c = resolver.resolve(InputMode::Ip, "8.8.8.8").unwrap();
        assert_eq!(c, Coordinate::new(-122.1, 37.4));
        assert_eq!(service.ip_calls(), 1);
        assert_eq!(service.last_query().as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_resolve_ip_failures() {
        let service = MockGeoService::new().failing();
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Ip, "8.8.8.8"),
            Err(AddressError::Unresolved)
        );

        let service = MockGeoService::new();
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Ip, "10.0.0.1"),
            Err(AddressError::Unresolved)
        );

        let service = MockGeoService::new().with_ip_loc("somewhere");
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Ip, "10.0.0.1"),
            Err(AddressError::Unresolved)
        );
    }

    #[test]
    fn test_resolve_postal_samples_bbox() {
        let bbox = vec![-118.43, 34.06, -118.38, 34.13];
        let service = MockGeoService::new().with_postcode(postcode_feature(Some(bbox.clone())));
        let resolver = Resolver::new(&service);
        let expected = BoundingBox::from_slice(&bbox).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let c = resolver
                .resolve_with_rng(InputMode::Postal, "90210", &mut rng)
                .unwrap();
            assert!(expected.contains(&c));
        }
        assert_eq!(service.postcode_calls(), 50);
    }

    #[test]
    fn test_resolve_postal_failures() {
        // no features
        let service = MockGeoService::new();
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "99999"),
            Err(AddressError::Unresolved)
        );

        // feature without bbox
        let service = MockGeoService::new().with_postcode(postcode_feature(None));
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "90210"),
            Err(AddressError::Unresolved)
        );

        // malformed bbox
        let service =
            MockGeoService::new().with_postcode(postcode_feature(Some(vec![1.0, 2.0, 0.0])));
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "90210"),
            Err(AddressError::Unresolved)
        );

        // corners are finite but the span overflows
        let service = MockGeoService::new()
            .with_postcode(postcode_feature(Some(vec![-1e308, 0.0, 1e308, 1.0])));
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "90210"),
            Err(AddressError::Unresolved)
        );

        // service error
        let service = MockGeoService::new().failing();
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "90210"),
            Err(AddressError::Unresolved)
        );
    }

    #[test]
    fn test_invalid_postal_makes_no_calls() {
        let service = MockGeoService::new();
        let resolver = Resolver::new(&service);
        assert_eq!(
            resolver.resolve(InputMode::Postal, "ABCDE"),
            Err(AddressError::InvalidPostalCode)
        );
        assert_eq!(
            resolver.resolve(InputMode::Ip, ""),
            Err(AddressError::EmptyInput)
        );
        assert_eq!(service.total_calls(), 0);
    }
}
