//! In-memory [`GeoService`] used by the lens tests.

use anyhow::{anyhow, Result};
use std::cell::{Cell, RefCell};

use super::service::GeoService;
use super::types::{Coordinate, Feature, FeatureCollection, IpLookupResponse};

#[derive(Default)]
pub(crate) struct MockGeoService {
    ip_loc: Option<String>,
    postcode: FeatureCollection,
    reverse: FeatureCollection,
    fail: bool,
    ip_calls: Cell<usize>,
    postcode_calls: Cell<usize>,
    reverse_calls: Cell<usize>,
    last_query: RefCell<Option<String>>,
    last_limit: Cell<Option<usize>>,
}

impl MockGeoService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_ip_loc(mut self, loc: &str) -> Self {
        self.ip_loc = Some(loc.to_string());
        self
    }

    pub(crate) fn with_postcode(mut self, collection: FeatureCollection) -> Self {
        self.postcode = collection;
        self
    }

    pub(crate) fn with_postcode_bbox(self, bbox: [f64; 4]) -> Self {
        self.with_postcode(FeatureCollection {
            features: vec![Feature {
                place_name: None,
                bbox: Some(bbox.to_vec()),
            }],
        })
    }

    pub(crate) fn with_reverse(mut self, collection: FeatureCollection) -> Self {
        self.reverse = collection;
        self
    }

    pub(crate) fn with_addresses(self, names: &[&str]) -> Self {
        self.with_reverse(FeatureCollection {
            features: names
                .iter()
                .map(|name| Feature {
                    place_name: Some(name.to_string()),
                    bbox: None,
                })
                .collect(),
        })
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub(crate) fn ip_calls(&self) -> usize {
        self.ip_calls.get()
    }

    pub(crate) fn postcode_calls(&self) -> usize {
        self.postcode_calls.get()
    }

    pub(crate) fn reverse_calls(&self) -> usize {
        self.reverse_calls.get()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.ip_calls() + self.postcode_calls() + self.reverse_calls()
    }

    pub(crate) fn last_query(&self) -> Option<String> {
        self.last_query.borrow().clone()
    }

    pub(crate) fn last_limit(&self) -> Option<usize> {
        self.last_limit.get()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(anyhow!("timed out"));
        }
        Ok(())
    }
}

impl GeoService for MockGeoService {
    fn lookup_ip(&self, ip: &str) -> Result<IpLookupResponse> {
        self.ip_calls.set(self.ip_calls.get() + 1);
        *self.last_query.borrow_mut() = Some(ip.to_string());
        self.check()?;
        Ok(IpLookupResponse {
            loc: self.ip_loc.clone(),
        })
    }

    fn geocode_postcode(&self, postcode: &str) -> Result<FeatureCollection> {
        self.postcode_calls.set(self.postcode_calls.get() + 1);
        *self.last_query.borrow_mut() = Some(postcode.to_string());
        self.check()?;
        Ok(self.postcode.clone())
    }

    fn reverse_geocode(&self, _coordinate: Coordinate, limit: usize) -> Result<FeatureCollection> {
        self.reverse_calls.set(self.reverse_calls.get() + 1);
        self.last_limit.set(Some(limit));
        self.check()?;
        Ok(self.reverse.clone())
    }
}
