//! Description types deserialized from `device.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level generic device description parsed from `device.toml`.
///
/// Entries are kept in file order. The position of an entry in its list is
/// the raw index of the handle the device model assigns to it.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceDescription {
    /// Device identification.
    pub device: DeviceMeta,
    /// Placement sites.
    #[serde(default)]
    pub sites: Vec<SiteDesc>,
    /// Routing wires.
    #[serde(default)]
    pub wires: Vec<WireDesc>,
    /// Programmable interconnect points between wires.
    #[serde(default)]
    pub pips: Vec<PipDesc>,
}

/// Device identification metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceMeta {
    /// Family name reported by the device model.
    #[serde(default = "default_family")]
    pub family: String,
    /// Device name reported by the device model.
    pub name: String,
}

fn default_family() -> String {
    "generic".to_string()
}

/// A placement site declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteDesc {
    /// Unique site name.
    pub name: String,
    /// Site type symbol; cells of the same type are legal here by default.
    #[serde(rename = "type")]
    pub site_type: String,
    /// Hidden from user-facing listings.
    #[serde(default)]
    pub hidden: bool,
    /// Site drives a global buffer.
    #[serde(default)]
    pub global_buf: bool,
    /// Free-form attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

/// A routing wire declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct WireDesc {
    /// Unique wire name.
    pub name: String,
    /// Optional wire type symbol.
    #[serde(default, rename = "type")]
    pub wire_type: Option<String>,
    /// Free-form attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

/// A pip declaration connecting two declared wires.
#[derive(Debug, Clone, Deserialize)]
pub struct PipDesc {
    /// Unique pip name.
    pub name: String,
    /// Name of the wire driving the pip.
    pub src: String,
    /// Name of the wire the pip drives.
    pub dst: String,
    /// Optional pip type symbol.
    #[serde(default, rename = "type")]
    pub pip_type: Option<String>,
    /// Free-form attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}
