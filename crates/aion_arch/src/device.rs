//! The device capability trait.
//!
//! [`Device`] is what a device description implements. A handful of methods
//! are required: they describe the site and wire sets and the pip graph that
//! the binding core cannot work without. Every other method has a default body
//! that gives a neutral answer, so a new device only overrides what it
//! actually models.
//!
//! The defaults fall into three groups:
//!
//! - neutral answers valid for any device (empty attributes, no decals,
//!   [`TimingPortClass::Ignore`], no groups);
//! - answers valid only when the device keeps the default bucket key type
//!   [`Ident`]; with any other [`BucketKey`] they panic naming the method to
//!   override;
//! - stubs that are unreachable under the other defaults (group contents,
//!   port clocking info) and panic if called anyway.

use crate::bindings::Bindings;
use crate::ids::{CellId, DecalId, GroupId, NetId, PipId, SiteId, WireId};
use crate::netlist::{CellInfo, NetInfo, PortRef};
use crate::types::{Attr, DecalXy, Delay, GraphicElement, TimingClockingInfo, TimingPortClass};
use aion_common::{handle_checksum, Ident};
use std::fmt::Debug;
use std::hash::Hash;

/// A key identifying a site bucket.
///
/// The conversions to and from a name symbol are only available for
/// [`Ident`]. Devices that use their own key type must override
/// [`Device::bucket_name`] and [`Device::bucket_by_name`].
pub trait BucketKey: Copy + Eq + Hash + Ord + Debug {
    /// Returns the key's name, when the key is itself a name.
    fn as_name(self) -> Option<Ident> {
        None
    }

    /// Builds a key from a name, when keys are names.
    fn from_name(_name: Ident) -> Option<Self> {
        None
    }
}

impl BucketKey for Ident {
    fn as_name(self) -> Option<Ident> {
        Some(self)
    }

    fn from_name(name: Ident) -> Option<Self> {
        Some(name)
    }
}

/// The capability interface of a device description.
pub trait Device: Debug {
    /// Key type for site buckets. [`Ident`] enables the default bucket naming.
    type BucketId: BucketKey;

    // --- Required ---

    /// Returns the canonical family name (e.g., "generic", "ice40").
    fn family_name(&self) -> &str;

    /// Returns the device name.
    fn device_name(&self) -> &str;

    /// Returns every site in the device, in a stable order.
    fn sites(&self) -> Vec<SiteId>;

    /// Returns the type symbol of `site`.
    fn site_type(&self, site: SiteId) -> Ident;

    /// Returns the wire driven by `pip`.
    fn pip_dst_wire(&self, pip: PipId) -> WireId;

    /// Whether `wire` is a wire of this device.
    fn contains_wire(&self, wire: WireId) -> bool;

    /// Whether `site` is a site of this device.
    ///
    /// The default scans [`Device::sites`].
    fn contains_site(&self, site: SiteId) -> bool {
        self.sites().contains(&site)
    }

    // --- Basic config ---

    /// Number of pip layers per tile location.
    fn tile_pip_dim_z(&self, _x: i32, _y: i32) -> i32 {
        1
    }

    /// Character separating hierarchical name components.
    fn name_delimiter(&self) -> char {
        ' '
    }

    // --- Sites ---

    /// Checksum of a site handle.
    fn site_checksum(&self, site: SiteId) -> u32 {
        handle_checksum(site.as_raw())
    }

    /// Whether `site` is hidden from user-facing listings.
    fn site_hidden(&self, _site: SiteId) -> bool {
        false
    }

    /// Whether `site` drives a global buffer.
    fn site_global_buf(&self, _site: SiteId) -> bool {
        false
    }

    /// Attributes of `site`.
    fn site_attrs(&self, _site: SiteId) -> Vec<Attr> {
        Vec::new()
    }

    /// Site pins a cell pin maps to. Defaults to the pin of the same name.
    fn site_pins_for_cell_pin(&self, _cell: &CellInfo, pin: Ident) -> Vec<Ident> {
        vec![pin]
    }

    /// The cell that prevents binding `site`. Defaults to its occupant.
    fn conflicting_site_cell(&self, bindings: &Bindings, site: SiteId) -> Option<CellId> {
        bindings.site_cell(site)
    }

    // --- Wires ---

    /// Type symbol of `wire`, if the device types its wires.
    fn wire_type(&self, _wire: WireId) -> Option<Ident> {
        None
    }

    /// Attributes of `wire`.
    fn wire_attrs(&self, _wire: WireId) -> Vec<Attr> {
        Vec::new()
    }

    /// Checksum of a wire handle.
    fn wire_checksum(&self, wire: WireId) -> u32 {
        handle_checksum(wire.as_raw())
    }

    /// The wire whose binding prevents binding `wire`. Defaults to itself.
    fn conflicting_wire_wire(&self, wire: WireId) -> Option<WireId> {
        Some(wire)
    }

    /// The net that prevents binding `wire`. Defaults to its owner.
    fn conflicting_wire_net(&self, bindings: &Bindings, wire: WireId) -> Option<NetId> {
        bindings.wire_net(wire)
    }

    // --- Pips ---

    /// Type symbol of `pip`, if the device types its pips.
    fn pip_type(&self, _pip: PipId) -> Option<Ident> {
        None
    }

    /// Attributes of `pip`.
    fn pip_attrs(&self, _pip: PipId) -> Vec<Attr> {
        Vec::new()
    }

    /// Checksum of a pip handle.
    fn pip_checksum(&self, pip: PipId) -> u32 {
        handle_checksum(pip.as_raw())
    }

    /// A wire, other than the destination, whose binding prevents binding `pip`.
    fn conflicting_pip_wire(&self, _pip: PipId) -> Option<WireId> {
        None
    }

    /// The net that prevents binding `pip`. Defaults to its owner.
    fn conflicting_pip_net(&self, bindings: &Bindings, pip: PipId) -> Option<NetId> {
        bindings.pip_net(pip)
    }

    // --- Groups ---

    /// Looks up a group by hierarchical name.
    fn group_by_name(&self, _name: &[Ident]) -> Option<GroupId> {
        None
    }

    /// Hierarchical name of `group`.
    fn group_name(&self, _group: GroupId) -> Vec<Ident> {
        Vec::new()
    }

    /// All groups. The default device has none.
    fn groups(&self) -> Vec<GroupId> {
        Vec::new()
    }

    /// Sites in `group`. Unreachable while [`groups`](Device::groups) is empty.
    fn group_sites(&self, group: GroupId) -> Vec<SiteId> {
        unreachable!("group_sites({group}) called on a device without groups")
    }

    /// Wires in `group`. Unreachable while [`groups`](Device::groups) is empty.
    fn group_wires(&self, group: GroupId) -> Vec<WireId> {
        unreachable!("group_wires({group}) called on a device without groups")
    }

    /// Pips in `group`. Unreachable while [`groups`](Device::groups) is empty.
    fn group_pips(&self, group: GroupId) -> Vec<PipId> {
        unreachable!("group_pips({group}) called on a device without groups")
    }

    /// Subgroups of `group`. Unreachable while [`groups`](Device::groups) is empty.
    fn group_groups(&self, group: GroupId) -> Vec<GroupId> {
        unreachable!("group_groups({group}) called on a device without groups")
    }

    // --- Delay ---

    /// A timing budget that replaces the computed one for `sink` on `net`.
    fn budget_override(&self, _net: &NetInfo, _sink: &PortRef) -> Option<Delay> {
        None
    }

    // --- Decals ---

    /// Drawing primitives of `decal`.
    fn decal_graphics(&self, _decal: DecalId) -> Vec<GraphicElement> {
        Vec::new()
    }

    /// Decal for `site`.
    fn site_decal(&self, _site: SiteId) -> DecalXy {
        DecalXy::default()
    }

    /// Decal for `wire`.
    fn wire_decal(&self, _wire: WireId) -> DecalXy {
        DecalXy::default()
    }

    /// Decal for `pip`.
    fn pip_decal(&self, _pip: PipId) -> DecalXy {
        DecalXy::default()
    }

    /// Decal for `group`.
    fn group_decal(&self, _group: GroupId) -> DecalXy {
        DecalXy::default()
    }

    // --- Cell timing ---

    /// Combinational delay from `from_port` to `to_port` of `cell`, if any.
    fn cell_delay(&self, _cell: &CellInfo, _from_port: Ident, _to_port: Ident) -> Option<Delay> {
        None
    }

    /// Timing class of `port` on `cell`, with the number of clocking-info
    /// entries available through [`port_clocking_info`](Device::port_clocking_info).
    fn port_timing_class(&self, _cell: &CellInfo, _port: Ident) -> (TimingPortClass, usize) {
        (TimingPortClass::Ignore, 0)
    }

    /// Clocking info entry `index` for `port`. Unreachable while
    /// [`port_timing_class`](Device::port_timing_class) reports zero entries.
    fn port_clocking_info(&self, cell: &CellInfo, _port: Ident, index: usize) -> TimingClockingInfo {
        unreachable!(
            "port_clocking_info(index {index}) called for cell {} with no clocked ports",
            cell.id
        )
    }

    // --- Placement validity ---

    /// Whether a cell of `cell_type` may be placed on `site`.
    ///
    /// The default accepts exactly the site's own type. Devices with
    /// heterogeneous sites (e.g. a slice hosting both LUTs and flip-flops)
    /// override this together with [`bucket_for_cell_type`](Device::bucket_for_cell_type).
    fn is_valid_for_cell_type(&self, cell_type: Ident, site: SiteId) -> bool {
        cell_type == self.site_type(site)
    }

    /// Name of `bucket`.
    ///
    /// # Panics
    ///
    /// The default panics unless `BucketId` is [`Ident`].
    fn bucket_name(&self, bucket: Self::BucketId) -> Ident {
        bucket.as_name().unwrap_or_else(|| {
            panic!(
                "{}: bucket_name must be implemented when BucketId is a type other than Ident",
                self.family_name()
            )
        })
    }

    /// Bucket with the given name.
    ///
    /// # Panics
    ///
    /// The default panics unless `BucketId` is [`Ident`].
    fn bucket_by_name(&self, name: Ident) -> Self::BucketId {
        <Self::BucketId as BucketKey>::from_name(name).unwrap_or_else(|| {
            panic!(
                "{}: bucket_by_name must be implemented when BucketId is a type other than Ident",
                self.family_name()
            )
        })
    }

    /// Bucket that `site` belongs to. Defaults to the bucket of its type.
    fn bucket_for_site(&self, site: SiteId) -> Self::BucketId {
        self.bucket_for_cell_type(self.site_type(site))
    }

    /// Bucket holding the sites legal for `cell_type`.
    fn bucket_for_cell_type(&self, cell_type: Ident) -> Self::BucketId {
        self.bucket_by_name(cell_type)
    }

    /// Whether the cells currently bound around `site` form a legal
    /// configuration.
    fn is_site_location_valid(&self, _bindings: &Bindings, _site: SiteId) -> bool {
        true
    }

    // --- Flow ---

    /// Hook run once the design is loaded, before placement.
    fn assign_arch_info(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::Netlist;
    use aion_common::Interner;

    /// A device that implements only the required methods.
    #[derive(Debug)]
    struct Bare {
        lut: Ident,
    }

    impl Device for Bare {
        type BucketId = Ident;

        fn family_name(&self) -> &str {
            "bare"
        }
        fn device_name(&self) -> &str {
            "bare0"
        }
        fn sites(&self) -> Vec<SiteId> {
            vec![SiteId::from_raw(0)]
        }
        fn site_type(&self, _site: SiteId) -> Ident {
            self.lut
        }
        fn pip_dst_wire(&self, pip: PipId) -> WireId {
            WireId::from_raw(pip.as_raw())
        }
        fn contains_wire(&self, wire: WireId) -> bool {
            wire.is_valid()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct Slot(u8);

    impl BucketKey for Slot {}

    /// A device with a custom bucket key that forgot the naming overrides.
    #[derive(Debug)]
    struct Slotted;

    impl Device for Slotted {
        type BucketId = Slot;

        fn family_name(&self) -> &str {
            "slotted"
        }
        fn device_name(&self) -> &str {
            "slotted0"
        }
        fn sites(&self) -> Vec<SiteId> {
            Vec::new()
        }
        fn site_type(&self, _site: SiteId) -> Ident {
            Ident::from_raw(0)
        }
        fn pip_dst_wire(&self, _pip: PipId) -> WireId {
            WireId::INVALID
        }
        fn contains_wire(&self, _wire: WireId) -> bool {
            false
        }
    }

    fn bare() -> (Bare, Interner) {
        let interner = Interner::new();
        let lut = interner.get_or_intern("LUT");
        (Bare { lut }, interner)
    }

    fn sample_cell(interner: &Interner) -> CellInfo {
        let mut nl = Netlist::new();
        let id = nl.add_cell(interner.get_or_intern("c"), interner.get_or_intern("LUT"));
        nl.cell(id).clone()
    }

    #[test]
    fn neutral_defaults() {
        let (dev, interner) = bare();
        let s = SiteId::from_raw(0);
        let w = WireId::from_raw(3);
        let p = PipId::from_raw(5);
        assert_eq!(dev.tile_pip_dim_z(0, 0), 1);
        assert_eq!(dev.name_delimiter(), ' ');
        assert!(!dev.site_hidden(s));
        assert!(!dev.site_global_buf(s));
        assert!(dev.site_attrs(s).is_empty());
        assert!(dev.wire_attrs(w).is_empty());
        assert!(dev.pip_attrs(p).is_empty());
        assert_eq!(dev.wire_type(w), None);
        assert_eq!(dev.pip_type(p), None);
        assert!(dev.groups().is_empty());
        assert_eq!(dev.group_by_name(&[interner.get_or_intern("g")]), None);
        assert!(dev.group_name(GroupId::from_raw(0)).is_empty());
        assert!(dev.decal_graphics(DecalId::from_raw(0)).is_empty());
        assert_eq!(dev.site_decal(s), DecalXy::default());
        assert_eq!(dev.wire_decal(w), DecalXy::default());
        assert_eq!(dev.pip_decal(p), DecalXy::default());
        assert_eq!(dev.group_decal(GroupId::from_raw(0)), DecalXy::default());
        assert_eq!(dev.conflicting_wire_wire(w), Some(w));
        assert_eq!(dev.conflicting_pip_wire(p), None);
        assert!(dev.is_site_location_valid(&Bindings::new(), s));
    }

    #[test]
    fn site_membership_scans_site_list() {
        let (dev, _) = bare();
        assert!(dev.contains_site(SiteId::from_raw(0)));
        assert!(!dev.contains_site(SiteId::from_raw(1)));
        assert!(!dev.contains_site(SiteId::INVALID));
    }

    #[test]
    fn checksums_hash_the_handle() {
        let (dev, _) = bare();
        assert_eq!(dev.site_checksum(SiteId::from_raw(7)), handle_checksum(7));
        assert_eq!(dev.wire_checksum(WireId::from_raw(7)), handle_checksum(7));
        assert_ne!(
            dev.pip_checksum(PipId::from_raw(7)),
            dev.pip_checksum(PipId::from_raw(8))
        );
    }

    #[test]
    fn timing_defaults() {
        let (dev, interner) = bare();
        let cell = sample_cell(&interner);
        let a = interner.get_or_intern("A");
        let o = interner.get_or_intern("O");
        assert_eq!(dev.cell_delay(&cell, a, o), None);
        assert_eq!(dev.port_timing_class(&cell, a), (TimingPortClass::Ignore, 0));
        assert_eq!(dev.site_pins_for_cell_pin(&cell, a), vec![a]);
    }

    #[test]
    fn budget_override_default_none() {
        let (dev, interner) = bare();
        let mut nl = Netlist::new();
        let n = nl.add_net(interner.get_or_intern("n"));
        let sink = PortRef {
            cell: CellId::from_raw(0),
            port: interner.get_or_intern("I0"),
        };
        assert_eq!(dev.budget_override(nl.net(n), &sink), None);
    }

    #[test]
    fn ident_buckets_are_names() {
        let (dev, interner) = bare();
        let lut = interner.get_or_intern("LUT");
        assert_eq!(dev.bucket_by_name(lut), lut);
        assert_eq!(dev.bucket_name(lut), lut);
        assert_eq!(dev.bucket_for_cell_type(lut), lut);
        assert_eq!(dev.bucket_for_site(SiteId::from_raw(0)), lut);
        assert!(dev.is_valid_for_cell_type(lut, SiteId::from_raw(0)));
        assert!(!dev.is_valid_for_cell_type(interner.get_or_intern("FF"), SiteId::from_raw(0)));
    }

    #[test]
    #[should_panic(expected = "bucket_name must be implemented")]
    fn custom_bucket_key_requires_name_override() {
        Slotted.bucket_name(Slot(0));
    }

    #[test]
    #[should_panic(expected = "slotted: bucket_by_name must be implemented")]
    fn custom_bucket_key_requires_lookup_override() {
        Slotted.bucket_by_name(Ident::from_raw(0));
    }

    #[test]
    #[should_panic(expected = "called on a device without groups")]
    fn group_contents_unreachable() {
        let (dev, _) = bare();
        dev.group_sites(GroupId::from_raw(0));
    }

    #[test]
    #[should_panic(expected = "no clocked ports")]
    fn clocking_info_unreachable() {
        let (dev, interner) = bare();
        let cell = sample_cell(&interner);
        dev.port_clocking_info(&cell, interner.get_or_intern("D"), 0);
    }
}
