//! The architecture state object.
//!
//! [`Arch`] owns a device description together with everything the binding
//! core derives from it or accumulates at run time: the binding maps, the
//! frozen cell-type and bucket indices, and an observer. Placers and routers
//! work through it exclusively.

use crate::bindings::Bindings;
use crate::buckets::{BucketIndex, CellTypes};
use crate::device::Device;
use crate::ids::{CellId, NetId, PipId, SiteId, WireId};
use crate::netlist::Netlist;
use crate::observer::BindObserver;
use crate::types::PlaceStrength;
use aion_common::{AionResult, Ident, Interner, InternalError};

/// Binding state and placement indices for one device.
///
/// The indices are built in [`Arch::new`] from the device's full site set, so
/// every bucket query on a constructed `Arch` is answered from a complete
/// index. All bind and unbind methods panic on contract violations; callers
/// are expected to check availability first.
#[derive(Debug)]
pub struct Arch<D: Device, O: BindObserver = ()> {
    device: D,
    bindings: Bindings,
    cell_types: CellTypes,
    buckets: BucketIndex<D::BucketId>,
    observer: O,
}

impl<D: Device> Arch<D> {
    /// Creates the binding state for `device` with no observer.
    pub fn new(device: D, interner: &Interner) -> Self {
        Self::with_observer(device, interner, ())
    }
}

impl<D: Device, O: BindObserver> Arch<D, O> {
    /// Creates the binding state for `device`, notifying `observer` of every
    /// binding change.
    pub fn with_observer(device: D, interner: &Interner, observer: O) -> Self {
        let cell_types = CellTypes::collect(&device, interner);
        let buckets = BucketIndex::build(&device, &cell_types);
        tracing::debug!(
            family = device.family_name(),
            device = device.device_name(),
            cell_types = cell_types.len(),
            buckets = buckets.buckets().len(),
            sites = buckets.site_count(),
            "built placement indices"
        );
        Self {
            device,
            bindings: Bindings::new(),
            cell_types,
            buckets,
            observer,
        }
    }

    /// The device description.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The binding maps.
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Runs the device's post-load hook.
    pub fn assign_arch_info(&mut self) {
        self.device.assign_arch_info();
    }

    // --- Sites ---

    /// Binds `cell` to `site`.
    ///
    /// # Panics
    ///
    /// Panics if `site` is the null handle or not a site of the device,
    /// `site` is already bound, or `cell` is already placed elsewhere.
    pub fn bind_site(
        &mut self,
        netlist: &mut Netlist,
        site: SiteId,
        cell: CellId,
        strength: PlaceStrength,
    ) {
        assert!(site.is_valid(), "bind_site: null site handle");
        assert!(
            self.device.contains_site(site),
            "bind_site: site {site} is not part of device {}",
            self.device.device_name()
        );
        self.bindings.bind_site(netlist, site, cell, strength);
        tracing::trace!(%site, %cell, ?strength, "bind site");
        self.observer.site_changed(site);
    }

    /// Unbinds `site` and returns the cell that occupied it.
    ///
    /// # Panics
    ///
    /// Panics if `site` is the null handle or not bound.
    pub fn unbind_site(&mut self, netlist: &mut Netlist, site: SiteId) -> CellId {
        let cell = self.bindings.unbind_site(netlist, site);
        tracing::trace!(%site, %cell, "unbind site");
        self.observer.site_changed(site);
        cell
    }

    /// Whether `site` has no occupant.
    pub fn check_site_avail(&self, site: SiteId) -> bool {
        self.bound_site_cell(site).is_none()
    }

    /// The cell bound to `site`.
    pub fn bound_site_cell(&self, site: SiteId) -> Option<CellId> {
        self.bindings.site_cell(site)
    }

    /// The cell that would have to move for `site` to be bound.
    pub fn conflicting_site_cell(&self, site: SiteId) -> Option<CellId> {
        self.device.conflicting_site_cell(&self.bindings, site)
    }

    // --- Wires ---

    /// Binds `wire` to `net` with no driving pip.
    ///
    /// # Panics
    ///
    /// Panics if `wire` is the null handle, not a wire of the device, or
    /// already bound.
    pub fn bind_wire(
        &mut self,
        netlist: &mut Netlist,
        wire: WireId,
        net: NetId,
        strength: PlaceStrength,
    ) {
        assert!(wire.is_valid(), "bind_wire: null wire handle");
        assert!(
            self.device.contains_wire(wire),
            "bind_wire: wire {wire} is not part of device {}",
            self.device.device_name()
        );
        self.bindings.bind_wire(netlist, wire, net, strength);
        tracing::trace!(%wire, %net, ?strength, "bind wire");
        self.observer.wire_changed(wire);
    }

    /// Unbinds `wire`. A pip driving the wire is released with it.
    ///
    /// Returns the net that owned the wire.
    ///
    /// # Panics
    ///
    /// Panics if `wire` is the null handle or not bound.
    pub fn unbind_wire(&mut self, netlist: &mut Netlist, wire: WireId) -> NetId {
        let released = self.bindings.unbind_wire(netlist, wire);
        tracing::trace!(%wire, net = %released.net, pip = ?released.pip, "unbind wire");
        self.observer.wire_changed(wire);
        if let Some(pip) = released.pip {
            self.observer.pip_changed(pip);
        }
        released.net
    }

    /// Whether `wire` has no owner.
    pub fn check_wire_avail(&self, wire: WireId) -> bool {
        self.bound_wire_net(wire).is_none()
    }

    /// The net bound to `wire`.
    pub fn bound_wire_net(&self, wire: WireId) -> Option<NetId> {
        self.bindings.wire_net(wire)
    }

    /// The wire whose binding blocks `wire`.
    pub fn conflicting_wire_wire(&self, wire: WireId) -> Option<WireId> {
        self.device.conflicting_wire_wire(wire)
    }

    /// The net that would have to be ripped up for `wire` to be bound.
    pub fn conflicting_wire_net(&self, wire: WireId) -> Option<NetId> {
        self.device.conflicting_wire_net(&self.bindings, wire)
    }

    // --- Pips ---

    /// Binds `pip` and its destination wire to `net`.
    ///
    /// If the destination wire is already bound to `net` without a driver,
    /// `pip` becomes its driver.
    ///
    /// # Panics
    ///
    /// Panics if `pip` is the null handle or already bound, or if the
    /// destination wire belongs to another net or already has a driver.
    pub fn bind_pip(
        &mut self,
        netlist: &mut Netlist,
        pip: PipId,
        net: NetId,
        strength: PlaceStrength,
    ) {
        assert!(pip.is_valid(), "bind_pip: null pip handle");
        let dst = self.device.pip_dst_wire(pip);
        self.bindings.bind_pip(netlist, pip, dst, net, strength);
        tracing::trace!(%pip, %dst, %net, ?strength, "bind pip");
        self.observer.pip_changed(pip);
        self.observer.wire_changed(dst);
    }

    /// Unbinds `pip` and removes its destination wire from the net.
    ///
    /// Returns the net that owned the pip.
    ///
    /// # Panics
    ///
    /// Panics if `pip` is the null handle or not bound.
    pub fn unbind_pip(&mut self, netlist: &mut Netlist, pip: PipId) -> NetId {
        assert!(pip.is_valid(), "unbind_pip: null pip handle");
        let dst = self.device.pip_dst_wire(pip);
        let net = self.bindings.unbind_pip(netlist, pip, dst);
        tracing::trace!(%pip, %dst, %net, "unbind pip");
        self.observer.pip_changed(pip);
        self.observer.wire_changed(dst);
        net
    }

    /// Whether `pip` has no owner.
    pub fn check_pip_avail(&self, pip: PipId) -> bool {
        self.bound_pip_net(pip).is_none()
    }

    /// The net bound to `pip`.
    pub fn bound_pip_net(&self, pip: PipId) -> Option<NetId> {
        self.bindings.pip_net(pip)
    }

    /// A wire other than the destination whose binding blocks `pip`.
    pub fn conflicting_pip_wire(&self, pip: PipId) -> Option<WireId> {
        self.device.conflicting_pip_wire(pip)
    }

    /// The net that would have to be ripped up for `pip` to be bound.
    pub fn conflicting_pip_net(&self, pip: PipId) -> Option<NetId> {
        self.device.conflicting_pip_net(&self.bindings, pip)
    }

    // --- Placement validity ---

    /// All site types, sorted by name.
    pub fn cell_types(&self) -> &[Ident] {
        self.cell_types.as_slice()
    }

    /// All bucket keys, sorted.
    pub fn buckets(&self) -> &[D::BucketId] {
        self.buckets.buckets()
    }

    /// Sites in `bucket`.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is not a bucket of this device.
    pub fn sites_in_bucket(&self, bucket: D::BucketId) -> &[SiteId] {
        self.buckets.sites_in_bucket(bucket)
    }

    /// Whether a cell of `cell_type` may be placed on `site`.
    pub fn is_valid_for_cell_type(&self, cell_type: Ident, site: SiteId) -> bool {
        self.device.is_valid_for_cell_type(cell_type, site)
    }

    /// Whether the cells bound around `site` form a legal configuration.
    pub fn is_site_location_valid(&self, site: SiteId) -> bool {
        self.device.is_site_location_valid(&self.bindings, site)
    }

    /// Sites in the bucket of `cell_type` that accept a cell of that type.
    ///
    /// This is the candidate set a placer enumerates: one bucket lookup, then
    /// a scan of only that bucket. Empty when the device has no site for
    /// `cell_type`.
    pub fn legal_sites(&self, cell_type: Ident) -> impl Iterator<Item = SiteId> + '_ {
        let bucket = self.device.bucket_for_cell_type(cell_type);
        self.buckets
            .get(bucket)
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |&site| self.is_valid_for_cell_type(cell_type, site))
    }

    // --- Consistency ---

    /// Checks every binding invariant against `netlist`.
    ///
    /// Covers the back-references of cells and nets, that every bound site
    /// and wire belongs to the device, and that each bound pip drives a wire
    /// owned by the same net.
    pub fn verify(&self, netlist: &Netlist) -> AionResult<()> {
        self.bindings.verify(netlist)?;
        let device = self.device.device_name();
        if let Some(site) = self.bindings.sites().find(|&s| !self.device.contains_site(s)) {
            return Err(InternalError::new(format!(
                "site {site} is bound but is not part of device {device}"
            )));
        }
        if let Some(wire) = self.bindings.wires().find(|&w| !self.device.contains_wire(w)) {
            return Err(InternalError::new(format!(
                "wire {wire} is bound but is not part of device {device}"
            )));
        }
        for (pip, net) in self.bindings.pips() {
            let dst = self.device.pip_dst_wire(pip);
            if self.bindings.wire_net(dst) != Some(net) {
                return Err(InternalError::new(format!(
                    "pip {pip} is bound to net {net}, but its destination wire {dst} is not"
                )));
            }
            if netlist.net(net).driving_pip(dst) != Some(pip) {
                return Err(InternalError::new(format!(
                    "pip {pip} is bound to net {net}, but is not recorded as the driver of wire {dst}"
                )));
            }
        }
        Ok(())
    }
}
