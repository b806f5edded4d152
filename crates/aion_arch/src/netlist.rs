//! Design database: cells and nets that device resources are bound to.
//!
//! The [`Netlist`] owns every [`CellInfo`] and [`NetInfo`]. The architecture
//! core never owns design objects; it refers to them by [`CellId`] and
//! [`NetId`] and keeps their placement and routing fields in step with its
//! binding maps.

use crate::ids::{CellId, NetId, PipId, SiteId, WireId};
use crate::types::PlaceStrength;
use aion_common::Ident;
use std::collections::HashMap;

/// A reference to one port of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    /// The cell owning the port.
    pub cell: CellId,
    /// The port name.
    pub port: Ident,
}

/// A routed wire's entry in its net's wire-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipMap {
    /// The pip driving the wire, or `None` when the wire is used directly.
    pub pip: Option<PipId>,
    /// Strength of the wire binding.
    pub strength: PlaceStrength,
}

/// A logical cell instance.
#[derive(Debug, Clone)]
pub struct CellInfo {
    /// The unique ID of this cell.
    pub id: CellId,
    /// Instance name.
    pub name: Ident,
    /// Cell type symbol, compared against site types for legality.
    pub cell_type: Ident,
    /// The site this cell is bound to (`None` = unplaced).
    pub site: Option<SiteId>,
    /// Strength of the site binding; `None` while unplaced.
    pub site_strength: PlaceStrength,
}

/// A logical signal.
#[derive(Debug, Clone)]
pub struct NetInfo {
    /// The unique ID of this net.
    pub id: NetId,
    /// Net name.
    pub name: Ident,
    /// Every wire bound to this net, with its driving pip.
    pub wires: HashMap<WireId, PipMap>,
}

impl NetInfo {
    /// Returns the pip driving `wire` in this net's routing, if the wire is
    /// bound to this net and driven through a pip.
    pub fn driving_pip(&self, wire: WireId) -> Option<PipId> {
        self.wires.get(&wire).and_then(|m| m.pip)
    }

    /// Returns whether this net has no bound wires.
    pub fn is_unrouted(&self) -> bool {
        self.wires.is_empty()
    }
}

/// The design database.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    cells: Vec<CellInfo>,
    nets: Vec<NetInfo>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unplaced cell and returns its ID.
    pub fn add_cell(&mut self, name: Ident, cell_type: Ident) -> CellId {
        let id = CellId::from_raw(self.cells.len() as u32);
        self.cells.push(CellInfo {
            id,
            name,
            cell_type,
            site: None,
            site_strength: PlaceStrength::None,
        });
        id
    }

    /// Adds an unrouted net and returns its ID.
    pub fn add_net(&mut self, name: Ident) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        self.nets.push(NetInfo {
            id,
            name,
            wires: HashMap::new(),
        });
        id
    }

    /// Returns the cell with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this netlist.
    pub fn cell(&self, id: CellId) -> &CellInfo {
        &self.cells[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the cell with the given ID.
    pub fn cell_mut(&mut self, id: CellId) -> &mut CellInfo {
        &mut self.cells[id.as_raw() as usize]
    }

    /// Returns the net with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this netlist.
    pub fn net(&self, id: NetId) -> &NetInfo {
        &self.nets[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the net with the given ID.
    pub fn net_mut(&mut self, id: NetId) -> &mut NetInfo {
        &mut self.nets[id.as_raw() as usize]
    }

    /// Iterates over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &CellInfo> {
        self.cells.iter()
    }

    /// Iterates over all nets.
    pub fn nets(&self) -> impl Iterator<Item = &NetInfo> {
        self.nets.iter()
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_common::Interner;

    #[test]
    fn empty_netlist() {
        let nl = Netlist::new();
        assert_eq!(nl.cell_count(), 0);
        assert_eq!(nl.net_count(), 0);
    }

    #[test]
    fn add_cell_starts_unplaced() {
        let interner = Interner::new();
        let mut nl = Netlist::new();
        let id = nl.add_cell(interner.get_or_intern("lut_0"), interner.get_or_intern("LUT"));
        let cell = nl.cell(id);
        assert_eq!(cell.id, id);
        assert!(cell.site.is_none());
        assert_eq!(cell.site_strength, PlaceStrength::None);
        assert_eq!(interner.resolve(cell.name), "lut_0");
        assert_eq!(nl.cells().count(), 1);
    }

    #[test]
    fn add_net_starts_unrouted() {
        let interner = Interner::new();
        let mut nl = Netlist::new();
        let a = nl.add_net(interner.get_or_intern("clk"));
        let b = nl.add_net(interner.get_or_intern("rst"));
        assert_ne!(a, b);
        assert!(nl.net(a).is_unrouted());
        assert_eq!(nl.net(b).driving_pip(WireId::from_raw(0)), None);
        assert_eq!(interner.resolve(nl.net(b).name), "rst");
        assert_eq!(nl.nets().count(), 2);
    }

    #[test]
    fn driving_pip_reads_wire_entry() {
        let interner = Interner::new();
        let mut nl = Netlist::new();
        let n = nl.add_net(interner.get_or_intern("n"));
        let w = WireId::from_raw(3);
        nl.net_mut(n).wires.insert(
            w,
            PipMap {
                pip: Some(PipId::from_raw(9)),
                strength: PlaceStrength::Weak,
            },
        );
        assert_eq!(nl.net(n).driving_pip(w), Some(PipId::from_raw(9)));
    }
}
