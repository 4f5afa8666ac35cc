//! Types shared by the address lens: coordinates, input modes, the lookup
//! service wire formats, and the user-facing error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Coordinates
// =============================================================================

/// A (longitude, latitude) pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Parse an ipinfo-style `"lat,lon"` location string.
    ///
    /// Note the order: the service reports latitude first.
    pub fn from_lat_lon_str(loc: &str) -> Option<Self> {
        let (lat, lon) = loc.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some(Self { lon, lat })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Rectangle `[min_lon, min_lat, max_lon, max_lat]` around a feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Build a box from the four floats a geocoding feature carries.
    ///
    /// Returns `None` unless there are exactly four finite values with
    /// `min <= max` on both axes and a finite width and height.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let [min_lon, min_lat, max_lon, max_lat] = <[f64; 4]>::try_from(values).ok()?;
        if values.iter().any(|v| !v.is_finite()) || min_lon > max_lon || min_lat > max_lat {
            return None;
        }
        // finite corners can still span more than f64::MAX
        if !(max_lon - min_lon).is_finite() || !(max_lat - min_lat).is_finite() {
            return None;
        }
        Some(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&coordinate.lon)
            && (self.min_lat..=self.max_lat).contains(&coordinate.lat)
    }
}

// =============================================================================
// Input mode
// =============================================================================

/// Which kind of input a query carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InputMode {
    /// IP address, located through the IP lookup service
    #[default]
    Ip,
    /// Numeric postal code, located through the geocoding service
    #[cfg_attr(feature = "cli", value(alias = "zip"))]
    Postal,
}

impl InputMode {
    /// Prompt shown next to the input field
    pub fn prompt(&self) -> &'static str {
        match self {
            InputMode::Ip => "Enter IP address:",
            InputMode::Postal => "Enter ZIP code:",
        }
    }

    /// Title of the panel for this mode
    pub fn title(&self) -> &'static str {
        match self {
            InputMode::Ip => "IP -> Address",
            InputMode::Postal => "ZIP -> Address",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Ip => write!(f, "ip"),
            InputMode::Postal => write!(f, "postal"),
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ip" => Ok(InputMode::Ip),
            "postal" | "zip" | "postcode" => Ok(InputMode::Postal),
            _ => Err(format!("Unknown input mode '{}'. Valid modes: ip, postal", s)),
        }
    }
}

// =============================================================================
// Wire formats
// =============================================================================

/// Response of the IP lookup service (ipinfo-compatible)
///
/// Only the location is read; other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpLookupResponse {
    /// `"lat,lon"` in decimal degrees
    #[serde(default)]
    pub loc: Option<String>,
}

/// A geocoding feature collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One feature of a geocoding response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

// =============================================================================
// Errors
// =============================================================================

/// Failures a generate action can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// The input was empty after trimming
    EmptyInput,
    /// A postal code contained something other than digits
    InvalidPostalCode,
    /// The lookup failed or returned no usable location
    Unresolved,
    /// Reverse geocoding produced no addresses
    NoAddresses,
    /// Pasted text was blank
    EmptyPaste,
}

impl AddressError {
    /// Whether the input was rejected before any lookup ran
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AddressError::EmptyInput | AddressError::InvalidPostalCode | AddressError::EmptyPaste
        )
    }

    /// Text shown in the panel's result area when a generate action fails
    pub fn status_message(&self) -> &'static str {
        match self {
            AddressError::EmptyInput | AddressError::Unresolved => "Could not resolve input",
            AddressError::InvalidPostalCode => "ZIP code must be numeric.",
            AddressError::NoAddresses => "No addresses found",
            AddressError::EmptyPaste => "Clipboard is empty or not accessible.",
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::EmptyInput => write!(f, "Please enter a valid input."),
            AddressError::InvalidPostalCode => write!(f, "ZIP code must be numeric."),
            AddressError::Unresolved => write!(f, "Could not resolve input"),
            AddressError::NoAddresses => write!(f, "No addresses found"),
            AddressError::EmptyPaste => write!(f, "Clipboard is empty or not accessible."),
        }
    }
}

impl std::error::Error for AddressError {}
