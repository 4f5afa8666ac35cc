//! Lens module
//!
//! Lenses bundle lookup logic with output formatting so the same operations
//! can back the command line, a terminal panel, or any other front end.
//!
//! | Lens / component | Purpose |
//! |------------------|---------|
//! | `AddressLens` | IP or postal code -> coordinate -> nearby addresses |
//! | `Pager` | cursor over the addresses of one lookup |
//! | `Panel` / `Workbench` | per-mode state machine driven by user commands |
//!
//! # Usage
//!
//! ```rust,ignore
//! use addrgen::lens::address::{AddressLens, HttpGeoService, InputMode};
//! use addrgen::lens::panel::{Panel, PanelCommand};
//!
//! let service = HttpGeoService::new(&config);
//! let mut panel = Panel::new(InputMode::Ip, AddressLens::new(&service, 5));
//! panel.dispatch(PanelCommand::Input("8.8.8.8".to_string()))?;
//! panel.dispatch(PanelCommand::Generate)?;
//! println!("{}", panel.view().message);
//! ```

// Output format utilities
pub mod utils;

// AddressLens - resolver, reverse geocoder and lookup service access
pub mod address;

// Pager - cursor over an address list
pub mod pager;

// Panel - per-mode generate/navigate state machine
pub mod panel;
