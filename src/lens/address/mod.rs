//! Address generation lens
//!
//! Turns an IP address or a postal code into a short list of nearby street
//! addresses:
//!
//! 1. the [`Resolver`] maps the input to one coordinate (an IP lookup, or a
//!    random point inside the postal code's bounding box),
//! 2. the [`ReverseGeocoder`] maps that coordinate to up to `limit` addresses.
//!
//! # Example
//!
//! ```rust,ignore
//! use addrgen::lens::address::{AddressLens, GenerateArgs, HttpGeoService, InputMode};
//! use addrgen::AddrgenConfig;
//!
//! let config = AddrgenConfig::new(&None)?;
//! let service = HttpGeoService::new(&config);
//! let lens = AddressLens::new(&service, config.address_limit);
//!
//! let report = lens.generate(&GenerateArgs::new(InputMode::Postal, "90210"))?;
//! for address in &report.addresses {
//!     println!("{}", address);
//! }
//! ```

mod resolver;
mod reverse;
mod service;
mod types;

#[cfg(test)]
pub(crate) mod tests_support;

pub use resolver::{sample_in_bbox, validate_input, Resolver};
pub use reverse::ReverseGeocoder;
pub use service::{GeoService, HttpGeoService};
pub use types::{
    AddressError, BoundingBox, Coordinate, Feature, FeatureCollection, InputMode,
    IpLookupResponse,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ADDRESS_LIMIT;
use crate::lens::utils::OutputFormat;

// =============================================================================
// Types
// =============================================================================

/// Result of one successful generate action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReport {
    /// The trimmed query that was resolved
    pub query: String,
    /// Which lookup was used
    pub mode: InputMode,
    /// Coordinate the addresses were looked up around
    pub coordinate: Coordinate,
    /// Addresses, most relevant first
    pub addresses: Vec<String>,
    /// Number of addresses
    pub count: usize,
}

/// One row of the address table
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct AddressRow {
    #[cfg_attr(feature = "display", tabled(rename = "#"))]
    pub index: usize,
    pub address: String,
}

impl GenerateReport {
    /// Addresses as 1-based table rows
    pub fn rows(&self) -> Vec<AddressRow> {
        self.addresses
            .iter()
            .enumerate()
            .map(|(i, address)| AddressRow {
                index: i + 1,
                address: address.clone(),
            })
            .collect()
    }
}

// =============================================================================
// Args
// =============================================================================

/// Arguments for a generate action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct GenerateArgs {
    /// IP address or numeric postal code
    #[cfg_attr(feature = "cli", clap(value_name = "QUERY"))]
    pub query: String,

    /// Kind of query
    #[cfg_attr(feature = "cli", clap(short, long, value_enum, default_value = "ip"))]
    #[serde(default)]
    pub mode: InputMode,
}

impl GenerateArgs {
    pub fn new(mode: InputMode, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mode,
        }
    }
}

// =============================================================================
// Lens
// =============================================================================

/// Address generation lens
///
/// Borrows a [`GeoService`] so the same lens works against the real HTTP
/// services or an in-memory stand-in.
pub struct AddressLens<'a> {
    service: &'a dyn GeoService,
    limit: usize,
}

impl<'a> AddressLens<'a> {
    /// Create a lens returning at most `limit` addresses per lookup
    pub fn new(service: &'a dyn GeoService, limit: usize) -> Self {
        Self { service, limit }
    }

    /// Create a lens with the default address limit
    pub fn with_default_limit(service: &'a dyn GeoService) -> Self {
        Self::new(service, DEFAULT_ADDRESS_LIMIT)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.service)
    }

    pub fn reverse_geocoder(&self) -> ReverseGeocoder<'a> {
        ReverseGeocoder::new(self.service, self.limit)
    }

    /// Run the full pipeline for one query
    pub fn generate(&self, args: &GenerateArgs) -> Result<GenerateReport, AddressError> {
        self.generate_with_rng(args, &mut rand::rng())
    }

    /// Run the full pipeline with a caller-supplied RNG for postal sampling
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        args: &GenerateArgs,
        rng: &mut R,
    ) -> Result<GenerateReport, AddressError> {
        let coordinate = self
            .resolver()
            .resolve_with_rng(args.mode, &args.query, rng)?;

        let addresses = self.reverse_geocoder().addresses(coordinate);
        if addresses.is_empty() {
            return Err(AddressError::NoAddresses);
        }

        Ok(GenerateReport {
            query: args.query.trim().to_string(),
            mode: args.mode,
            coordinate,
            count: addresses.len(),
            addresses,
        })
    }

    /// Format a report for display
    ///
    /// Note: Table and Markdown formats require the `display` feature. Without
    /// it they fall back to pretty JSON.
    pub fn format_report(&self, report: &GenerateReport, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Table | OutputFormat::Markdown => {
                #[cfg(feature = "display")]
                {
                    use tabled::settings::Style;
                    use tabled::Table;

                    let mut table = Table::new(report.rows());
                    if *format == OutputFormat::Table {
                        table.with(Style::rounded());
                    } else {
                        table.with(Style::markdown());
                    }
                    format!(
                        "Query: {} ({})\nCoordinate: {}\nFound: {} addresses\n{}",
                        report.query, report.mode, report.coordinate, report.count, table
                    )
                }
                #[cfg(not(feature = "display"))]
                {
                    serde_json::to_string_pretty(report).unwrap_or_default()
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                format.to_json(report).unwrap_or_default()
            }
            OutputFormat::JsonLine => report
                .rows()
                .iter()
                .filter_map(|row| serde_json::to_string(row).ok())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Psv => {
                let mut lines = vec!["index|address".to_string()];
                lines.extend(
                    report
                        .rows()
                        .iter()
                        .map(|row| format!("{}|{}", row.index, row.address)),
                );
                lines.join("\n")
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
