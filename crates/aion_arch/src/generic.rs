//! A table-driven device built from named sites, wires, and pips.
//!
//! [`GenericDevice`] answers the required [`Device`] queries from plain
//! vectors indexed by handle, and overrides the attribute, type, and flag
//! capabilities with the values it was given. It can be built one entry at a
//! time or from a `device.toml` [`DeviceDescription`].

use crate::device::Device;
use crate::ids::{PipId, SiteId, WireId};
use crate::types::Attr;
use aion_common::{AionResult, Ident, Interner, InternalError};
use aion_config::{resolve_description, ConfigError, DeviceDescription};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
struct SiteData {
    name: Ident,
    site_type: Ident,
    hidden: bool,
    global_buf: bool,
    attrs: Vec<Attr>,
}

#[derive(Debug, Clone)]
struct WireData {
    name: Ident,
    wire_type: Option<Ident>,
    attrs: Vec<Attr>,
    uphill: Vec<PipId>,
    downhill: Vec<PipId>,
}

#[derive(Debug, Clone)]
struct PipData {
    name: Ident,
    pip_type: Option<Ident>,
    src: WireId,
    dst: WireId,
    attrs: Vec<Attr>,
}

/// A device described entirely by tables.
#[derive(Debug, Clone)]
pub struct GenericDevice {
    family: String,
    name: String,
    sites: Vec<SiteData>,
    wires: Vec<WireData>,
    pips: Vec<PipData>,
    site_by_name: HashMap<Ident, SiteId>,
    wire_by_name: HashMap<Ident, WireId>,
    pip_by_name: HashMap<Ident, PipId>,
}

impl GenericDevice {
    /// Creates an empty device of the `generic` family.
    pub fn new(name: &str) -> Self {
        Self {
            family: "generic".to_string(),
            name: name.to_string(),
            sites: Vec::new(),
            wires: Vec::new(),
            pips: Vec::new(),
            site_by_name: HashMap::new(),
            wire_by_name: HashMap::new(),
            pip_by_name: HashMap::new(),
        }
    }

    /// Builds a device from a validated description.
    ///
    /// Handles are assigned in description order: the n-th site is
    /// `SiteId::from_raw(n)`, and likewise for wires and pips.
    pub fn from_description(
        description: &DeviceDescription,
        interner: &Interner,
    ) -> Result<Self, ConfigError> {
        let resolved = resolve_description(description)?;
        let mut dev = Self::new(&description.device.name);
        dev.family = description.device.family.clone();

        let invalid = |e: InternalError| ConfigError::ValidationError(e.message);

        for s in &description.sites {
            let id = dev
                .add_site(interner, &s.name, &s.site_type)
                .map_err(invalid)?;
            let data = &mut dev.sites[id.as_raw() as usize];
            data.hidden = s.hidden;
            data.global_buf = s.global_buf;
            data.attrs = intern_attrs(interner, &s.attrs);
        }
        for w in &description.wires {
            let id = dev
                .add_wire(interner, &w.name, w.wire_type.as_deref())
                .map_err(invalid)?;
            dev.wires[id.as_raw() as usize].attrs = intern_attrs(interner, &w.attrs);
        }
        for (p, ends) in description.pips.iter().zip(&resolved.pips) {
            let id = dev
                .add_pip(
                    interner,
                    &p.name,
                    WireId::from_raw(ends.src as u32),
                    WireId::from_raw(ends.dst as u32),
                )
                .map_err(invalid)?;
            let data = &mut dev.pips[id.as_raw() as usize];
            data.pip_type = p.pip_type.as_deref().map(|t| interner.get_or_intern(t));
            data.attrs = intern_attrs(interner, &p.attrs);
        }

        tracing::debug!(
            device = %dev.name,
            sites = dev.sites.len(),
            wires = dev.wires.len(),
            pips = dev.pips.len(),
            "built generic device"
        );
        Ok(dev)
    }

    /// Adds a site of the given type.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if a site of that name already exists.
    pub fn add_site(&mut self, interner: &Interner, name: &str, site_type: &str) -> AionResult<SiteId> {
        let name = interner.get_or_intern(name);
        if self.site_by_name.contains_key(&name) {
            return Err(InternalError::new(format!(
                "duplicate site name '{}'",
                interner.resolve(name)
            )));
        }
        let id = SiteId::from_raw(self.sites.len() as u32);
        self.sites.push(SiteData {
            name,
            site_type: interner.get_or_intern(site_type),
            hidden: false,
            global_buf: false,
            attrs: Vec::new(),
        });
        self.site_by_name.insert(name, id);
        Ok(id)
    }

    /// Marks a site as hidden.
    pub fn set_site_hidden(&mut self, site: SiteId, hidden: bool) {
        self.site_mut(site).hidden = hidden;
    }

    /// Marks a site as driving a global buffer.
    pub fn set_site_global_buf(&mut self, site: SiteId, global_buf: bool) {
        self.site_mut(site).global_buf = global_buf;
    }

    /// Adds a routing wire.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if a wire of that name already exists.
    pub fn add_wire(
        &mut self,
        interner: &Interner,
        name: &str,
        wire_type: Option<&str>,
    ) -> AionResult<WireId> {
        let name = interner.get_or_intern(name);
        if self.wire_by_name.contains_key(&name) {
            return Err(InternalError::new(format!(
                "duplicate wire name '{}'",
                interner.resolve(name)
            )));
        }
        let id = WireId::from_raw(self.wires.len() as u32);
        self.wires.push(WireData {
            name,
            wire_type: wire_type.map(|t| interner.get_or_intern(t)),
            attrs: Vec::new(),
            uphill: Vec::new(),
            downhill: Vec::new(),
        });
        self.wire_by_name.insert(name, id);
        Ok(id)
    }

    /// Adds a pip from `src` to `dst`.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the name is taken or either wire is not
    /// part of this device.
    pub fn add_pip(
        &mut self,
        interner: &Interner,
        name: &str,
        src: WireId,
        dst: WireId,
    ) -> AionResult<PipId> {
        let name = interner.get_or_intern(name);
        if self.pip_by_name.contains_key(&name) {
            return Err(InternalError::new(format!(
                "duplicate pip name '{}'",
                interner.resolve(name)
            )));
        }
        for wire in [src, dst] {
            if wire.as_raw() as usize >= self.wires.len() {
                return Err(InternalError::new(format!(
                    "pip '{}' refers to unknown wire {wire}",
                    interner.resolve(name)
                )));
            }
        }
        let id = PipId::from_raw(self.pips.len() as u32);
        self.pips.push(PipData {
            name,
            pip_type: None,
            src,
            dst,
            attrs: Vec::new(),
        });
        self.wires[src.as_raw() as usize].downhill.push(id);
        self.wires[dst.as_raw() as usize].uphill.push(id);
        self.pip_by_name.insert(name, id);
        Ok(id)
    }

    /// Looks up a site by name.
    pub fn site_by_name(&self, name: Ident) -> Option<SiteId> {
        self.site_by_name.get(&name).copied()
    }

    /// Looks up a wire by name.
    pub fn wire_by_name(&self, name: Ident) -> Option<WireId> {
        self.wire_by_name.get(&name).copied()
    }

    /// Looks up a pip by name.
    pub fn pip_by_name(&self, name: Ident) -> Option<PipId> {
        self.pip_by_name.get(&name).copied()
    }

    /// Name of `site`.
    pub fn site_name(&self, site: SiteId) -> Ident {
        self.site(site).name
    }

    /// Name of `wire`.
    pub fn wire_name(&self, wire: WireId) -> Ident {
        self.wire(wire).name
    }

    /// Name of `pip`.
    pub fn pip_name(&self, pip: PipId) -> Ident {
        self.pip(pip).name
    }

    /// All wires, in handle order.
    pub fn wires(&self) -> Vec<WireId> {
        (0..self.wires.len() as u32).map(WireId::from_raw).collect()
    }

    /// All pips, in handle order.
    pub fn pips(&self) -> Vec<PipId> {
        (0..self.pips.len() as u32).map(PipId::from_raw).collect()
    }

    /// The wire driving `pip`.
    pub fn pip_src_wire(&self, pip: PipId) -> WireId {
        self.pip(pip).src
    }

    /// Pips driven by `wire`.
    pub fn pips_downhill(&self, wire: WireId) -> &[PipId] {
        &self.wire(wire).downhill
    }

    /// Pips driving `wire`.
    pub fn pips_uphill(&self, wire: WireId) -> &[PipId] {
        &self.wire(wire).uphill
    }

    fn site(&self, site: SiteId) -> &SiteData {
        self.sites
            .get(site.as_raw() as usize)
            .unwrap_or_else(|| panic!("{}: unknown site {site}", self.name))
    }

    fn site_mut(&mut self, site: SiteId) -> &mut SiteData {
        let name = &self.name;
        self.sites
            .get_mut(site.as_raw() as usize)
            .unwrap_or_else(|| panic!("{name}: unknown site {site}"))
    }

    fn wire(&self, wire: WireId) -> &WireData {
        self.wires
            .get(wire.as_raw() as usize)
            .unwrap_or_else(|| panic!("{}: unknown wire {wire}", self.name))
    }

    fn pip(&self, pip: PipId) -> &PipData {
        self.pips
            .get(pip.as_raw() as usize)
            .unwrap_or_else(|| panic!("{}: unknown pip {pip}", self.name))
    }
}

fn intern_attrs(interner: &Interner, attrs: &BTreeMap<String, String>) -> Vec<Attr> {
    attrs
        .iter()
        .map(|(k, v)| (interner.get_or_intern(k), v.clone()))
        .collect()
}

impl Device for GenericDevice {
    type BucketId = Ident;

    fn family_name(&self) -> &str {
        &self.family
    }

    fn device_name(&self) -> &str {
        &self.name
    }

    fn sites(&self) -> Vec<SiteId> {
        (0..self.sites.len() as u32).map(SiteId::from_raw).collect()
    }

    fn site_type(&self, site: SiteId) -> Ident {
        self.site(site).site_type
    }

    fn pip_dst_wire(&self, pip: PipId) -> WireId {
        self.pip(pip).dst
    }

    fn contains_wire(&self, wire: WireId) -> bool {
        (wire.as_raw() as usize) < self.wires.len()
    }

    fn contains_site(&self, site: SiteId) -> bool {
        (site.as_raw() as usize) < self.sites.len()
    }

    fn site_hidden(&self, site: SiteId) -> bool {
        self.site(site).hidden
    }

    fn site_global_buf(&self, site: SiteId) -> bool {
        self.site(site).global_buf
    }

    fn site_attrs(&self, site: SiteId) -> Vec<Attr> {
        self.site(site).attrs.clone()
    }

    fn wire_type(&self, wire: WireId) -> Option<Ident> {
        self.wire(wire).wire_type
    }

    fn wire_attrs(&self, wire: WireId) -> Vec<Attr> {
        self.wire(wire).attrs.clone()
    }

    fn pip_type(&self, pip: PipId) -> Option<Ident> {
        self.pip(pip).pip_type
    }

    fn pip_attrs(&self, pip: PipId) -> Vec<Attr> {
        self.pip(pip).attrs.clone()
    }
}
