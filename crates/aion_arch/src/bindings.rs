//! Exclusive-ownership tables binding device resources to design objects.
//!
//! [`Bindings`] holds three independent maps: site to cell, wire to net, and
//! pip to net. Every mutation takes the [`Netlist`] as well, so that a cell's
//! `site` field and a net's wire-set always agree with the maps.
//!
//! Contract violations (binding a bound resource, unbinding a free one, using
//! the null handle) panic. Each operation performs all of its checks before it
//! changes anything, so a panic never leaves the tables half-updated.

use crate::ids::{CellId, NetId, PipId, SiteId, WireId};
use crate::netlist::{Netlist, PipMap};
use crate::types::PlaceStrength;
use aion_common::{AionResult, InternalError};
use std::collections::HashMap;

/// The three binding maps.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    site_cell: HashMap<SiteId, CellId>,
    wire_net: HashMap<WireId, NetId>,
    pip_net: HashMap<PipId, NetId>,
}

/// What [`Bindings::unbind_wire`] released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReleasedWire {
    pub net: NetId,
    pub pip: Option<PipId>,
}

impl Bindings {
    /// Creates empty binding maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell bound to `site`.
    pub fn site_cell(&self, site: SiteId) -> Option<CellId> {
        self.site_cell.get(&site).copied()
    }

    /// Returns the net bound to `wire`.
    pub fn wire_net(&self, wire: WireId) -> Option<NetId> {
        self.wire_net.get(&wire).copied()
    }

    /// Returns the net bound to `pip`.
    pub fn pip_net(&self, pip: PipId) -> Option<NetId> {
        self.pip_net.get(&pip).copied()
    }

    /// Number of bound sites.
    pub fn bound_site_count(&self) -> usize {
        self.site_cell.len()
    }

    /// Number of bound wires.
    pub fn bound_wire_count(&self) -> usize {
        self.wire_net.len()
    }

    /// Number of bound pips.
    pub fn bound_pip_count(&self) -> usize {
        self.pip_net.len()
    }

    pub(crate) fn bind_site(
        &mut self,
        netlist: &mut Netlist,
        site: SiteId,
        cell: CellId,
        strength: PlaceStrength,
    ) {
        assert!(site.is_valid(), "bind_site: null site handle");
        if let Some(owner) = self.site_cell(site) {
            panic!("bind_site: site {site} is already bound to cell {owner}");
        }
        let info = netlist.cell_mut(cell);
        if let Some(current) = info.site {
            panic!("bind_site: cell {cell} is already placed at site {current}");
        }
        info.site = Some(site);
        info.site_strength = strength;
        self.site_cell.insert(site, cell);
    }

    pub(crate) fn unbind_site(&mut self, netlist: &mut Netlist, site: SiteId) -> CellId {
        assert!(site.is_valid(), "unbind_site: null site handle");
        let Some(cell) = self.site_cell.remove(&site) else {
            panic!("unbind_site: site {site} is not bound");
        };
        let info = netlist.cell_mut(cell);
        info.site = None;
        info.site_strength = PlaceStrength::None;
        cell
    }

    pub(crate) fn bind_wire(
        &mut self,
        netlist: &mut Netlist,
        wire: WireId,
        net: NetId,
        strength: PlaceStrength,
    ) {
        assert!(wire.is_valid(), "bind_wire: null wire handle");
        if let Some(owner) = self.wire_net(wire) {
            panic!("bind_wire: wire {wire} is already bound to net {owner}");
        }
        netlist
            .net_mut(net)
            .wires
            .insert(wire, PipMap { pip: None, strength });
        self.wire_net.insert(wire, net);
    }

    /// Releases `wire`, and the pip driving it if there is one.
    pub(crate) fn unbind_wire(&mut self, netlist: &mut Netlist, wire: WireId) -> ReleasedWire {
        assert!(wire.is_valid(), "unbind_wire: null wire handle");
        let Some(net) = self.wire_net(wire) else {
            panic!("unbind_wire: wire {wire} is not bound");
        };
        let Some(entry) = netlist.net_mut(net).wires.remove(&wire) else {
            panic!("unbind_wire: wire {wire} is bound to net {net} but missing from its wire-set");
        };
        if let Some(pip) = entry.pip {
            self.pip_net.remove(&pip);
        }
        self.wire_net.remove(&wire);
        ReleasedWire {
            net,
            pip: entry.pip,
        }
    }

    /// Binds `pip` and its destination wire `dst` to `net`.
    ///
    /// `dst` may already be bound to `net` without a driver, in which case
    /// the existing entry gains `pip` as its driver.
    pub(crate) fn bind_pip(
        &mut self,
        netlist: &mut Netlist,
        pip: PipId,
        dst: WireId,
        net: NetId,
        strength: PlaceStrength,
    ) {
        assert!(pip.is_valid(), "bind_pip: null pip handle");
        assert!(dst.is_valid(), "bind_pip: pip {pip} has a null destination wire");
        if let Some(owner) = self.pip_net(pip) {
            panic!("bind_pip: pip {pip} is already bound to net {owner}");
        }
        if let Some(owner) = self.wire_net(dst) {
            if owner != net {
                panic!(
                    "bind_pip: destination wire {dst} of pip {pip} is already bound to net {owner}"
                );
            }
            if let Some(driver) = netlist.net(net).driving_pip(dst) {
                panic!("bind_pip: destination wire {dst} of pip {pip} is already driven by pip {driver}");
            }
        }
        netlist.net_mut(net).wires.insert(
            dst,
            PipMap {
                pip: Some(pip),
                strength,
            },
        );
        self.wire_net.insert(dst, net);
        self.pip_net.insert(pip, net);
    }

    /// Releases `pip` and removes its destination wire `dst` from the net.
    pub(crate) fn unbind_pip(&mut self, netlist: &mut Netlist, pip: PipId, dst: WireId) -> NetId {
        assert!(pip.is_valid(), "unbind_pip: null pip handle");
        let Some(net) = self.pip_net(pip) else {
            panic!("unbind_pip: pip {pip} is not bound");
        };
        match self.wire_net(dst) {
            Some(owner) if owner == net => {}
            Some(owner) => panic!(
                "unbind_pip: destination wire {dst} of pip {pip} is bound to net {owner}, not {net}"
            ),
            None => panic!("unbind_pip: destination wire {dst} of pip {pip} is not bound"),
        }
        self.wire_net.remove(&dst);
        netlist.net_mut(net).wires.remove(&dst);
        self.pip_net.remove(&pip);
        net
    }

    /// Checks that every binding agrees with the back-references stored in
    /// the netlist, in both directions.
    pub fn verify(&self, netlist: &Netlist) -> AionResult<()> {
        for (&site, &cell) in &self.site_cell {
            if netlist.cell(cell).site != Some(site) {
                return Err(InternalError::new(format!(
                    "site {site} is bound to cell {cell}, but the cell is not placed there"
                )));
            }
        }
        for cell in netlist.cells() {
            if let Some(site) = cell.site {
                if self.site_cell(site) != Some(cell.id) {
                    return Err(InternalError::new(format!(
                        "cell {} claims site {site}, which is not bound to it",
                        cell.id
                    )));
                }
            }
        }
        for (&wire, &net) in &self.wire_net {
            if !netlist.net(net).wires.contains_key(&wire) {
                return Err(InternalError::new(format!(
                    "wire {wire} is bound to net {net}, but missing from its wire-set"
                )));
            }
        }
        for net in netlist.nets() {
            for (&wire, entry) in &net.wires {
                if self.wire_net(wire) != Some(net.id) {
                    return Err(InternalError::new(format!(
                        "net {} lists wire {wire}, which is not bound to it",
                        net.id
                    )));
                }
                if let Some(pip) = entry.pip {
                    if self.pip_net(pip) != Some(net.id) {
                        return Err(InternalError::new(format!(
                            "net {} drives wire {wire} through pip {pip}, which is not bound to it",
                            net.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.site_cell.keys().copied()
    }

    pub(crate) fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        self.wire_net.keys().copied()
    }

    pub(crate) fn pips(&self) -> impl Iterator<Item = (PipId, NetId)> + '_ {
        self.pip_net.iter().map(|(&p, &n)| (p, n))
    }
}
