#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! addrgen - IP address and postal code to street address toolkit
//!
//! addrgen resolves an IP address or a numeric postal code to a coordinate
//! through public lookup services, then reverse-geocodes that coordinate into
//! a handful of nearby street addresses. It can be used as both a
//! command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `lens` | Lookup services, resolver, pager and panel state machine | `ureq`, `rand` |
//! | `display` | Table formatting with `tabled` | `tabled` |
//! | `cli` | The `addrgen` binary | All above + `clap`, `tracing-subscriber` |
//!
//! ```toml
//! # Library use without the CLI
//! addrgen = { version = "0.1", default-features = false, features = ["lens"] }
//! ```
//!
//! # Architecture
//!
//! - **[`config`]**: configuration file + environment loading, including the
//!   geocoding access token
//! - **[`lens`]** (feature `lens`):
//!   - `address`: `AddressLens`, `Resolver`, `ReverseGeocoder`, and the
//!     `GeoService` seam with its HTTP implementation
//!   - `pager`: cursor over the resulting addresses
//!   - `panel`: command-driven state machine for an interactive front end
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use addrgen::lens::address::{AddressLens, GenerateArgs, HttpGeoService, InputMode};
//! use addrgen::AddrgenConfig;
//!
//! let config = AddrgenConfig::new(&None)?;
//! let service = HttpGeoService::new(&config);
//! let lens = AddressLens::new(&service, config.address_limit);
//!
//! match lens.generate(&GenerateArgs::new(InputMode::Ip, "8.8.8.8")) {
//!     Ok(report) => println!("{}", report.addresses.join("\n")),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod config;

#[cfg(feature = "lens")]
pub mod lens;

// =============================================================================
// Configuration (always available)
// =============================================================================

pub use config::{mask_token, AddrgenConfig, ServiceInfo};

// =============================================================================
// Lens Module - Feature-gated exports
// =============================================================================

#[cfg(feature = "lens")]
pub use lens::address::{
    AddressError, AddressLens, Coordinate, GenerateArgs, GenerateReport, GeoService,
    HttpGeoService, InputMode,
};

#[cfg(feature = "lens")]
pub use lens::pager::Pager;

#[cfg(feature = "lens")]
pub use lens::panel::{Panel, PanelCommand, PanelState, PanelView, Tone, Workbench};

#[cfg(feature = "lens")]
pub use lens::utils::OutputFormat;
