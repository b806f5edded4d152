//! Parsing and validation of `device.toml` generic device descriptions.
//!
//! A device description lists the sites, wires, and pips of a small device by
//! name. This crate reads the file and produces a strongly-typed
//! [`DeviceDescription`], then resolves pip endpoints to wire indices so that
//! a device model can be built without further name lookups.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_description, load_description_from_str};
pub use resolve::{resolve_description, ResolvedDescription, ResolvedPip};
pub use types::*;
