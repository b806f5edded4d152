//! Resource binding core for the Aion place-and-route engine.
//!
//! This crate sits between a device description and the placement and routing
//! algorithms. It provides:
//!
//! - the [`Device`] trait, which a device description implements. Only the
//!   site set, wire membership and pip destinations are required; every
//!   optional capability has a neutral default;
//! - [`Arch`], the per-device state object holding the exclusive binding maps
//!   (site to cell, wire to net, pip to net) and the frozen cell-type and
//!   bucket indices;
//! - the design database ([`Netlist`], [`CellInfo`], [`NetInfo`]) whose
//!   placement and routing fields `Arch` keeps consistent with its maps;
//! - [`GenericDevice`], a table-driven device that can be loaded from a
//!   `device.toml` description.
//!
//! # Usage
//!
//! ```
//! use aion_arch::{Arch, GenericDevice, Netlist, PlaceStrength};
//! use aion_common::Interner;
//!
//! let interner = Interner::new();
//! let mut device = GenericDevice::new("tiny");
//! let site = device.add_site(&interner, "A", "LUT").unwrap();
//!
//! let mut arch = Arch::new(device, &interner);
//! let mut netlist = Netlist::new();
//! let lut = interner.get_or_intern("LUT");
//! let cell = netlist.add_cell(interner.get_or_intern("lut_0"), lut);
//!
//! assert!(arch.is_valid_for_cell_type(lut, site));
//! assert!(arch.check_site_avail(site));
//! arch.bind_site(&mut netlist, site, cell, PlaceStrength::Placer);
//! assert_eq!(netlist.cell(cell).site, Some(site));
//! ```
//!
//! # Contract violations
//!
//! Binding a bound resource, unbinding a free one, or passing a null handle
//! is a bug in the caller and panics. There is no recoverable error path in
//! the binding protocol: callers check availability before binding.

#![warn(missing_docs)]

pub mod arch;
pub mod bindings;
pub mod buckets;
pub mod device;
pub mod generic;
pub mod ids;
pub mod netlist;
pub mod observer;
pub mod types;

pub use arch::Arch;
pub use bindings::Bindings;
pub use buckets::{BucketIndex, CellTypes};
pub use device::{BucketKey, Device};
pub use generic::GenericDevice;
pub use ids::{CellId, DecalId, GroupId, NetId, PipId, SiteId, WireId};
pub use netlist::{CellInfo, NetInfo, Netlist, PipMap, PortRef};
pub use observer::{BindObserver, ChangeLog, Changed};
pub use types::{
    Attr, ClockEdge, DecalXy, Delay, GraphicElement, GraphicKind, GraphicStyle, PlaceStrength,
    TimingClockingInfo, TimingPortClass,
};
