//! Name resolution: turning pip endpoint names into wire indices.

use crate::error::ConfigError;
use crate::types::DeviceDescription;
use std::collections::HashMap;

/// A pip whose endpoints have been resolved to wire indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPip {
    /// Index of the source wire in [`DeviceDescription::wires`].
    pub src: usize,
    /// Index of the destination wire in [`DeviceDescription::wires`].
    pub dst: usize,
}

/// A description with every cross-reference resolved to an index.
#[derive(Debug)]
pub struct ResolvedDescription<'a> {
    /// The underlying description.
    pub description: &'a DeviceDescription,
    /// One entry per pip, in description order.
    pub pips: Vec<ResolvedPip>,
}

/// Resolves every pip's `src` and `dst` wire names to wire indices.
pub fn resolve_description(
    description: &DeviceDescription,
) -> Result<ResolvedDescription<'_>, ConfigError> {
    let wire_index: HashMap<&str, usize> = description
        .wires
        .iter()
        .enumerate()
        .map(|(i, w)| (w.name.as_str(), i))
        .collect();

    let lookup = |pip: &str, wire: &str| {
        wire_index
            .get(wire)
            .copied()
            .ok_or_else(|| ConfigError::UnknownWire {
                pip: pip.to_string(),
                wire: wire.to_string(),
            })
    };

    let pips = description
        .pips
        .iter()
        .map(|p| {
            Ok(ResolvedPip {
                src: lookup(&p.name, &p.src)?,
                dst: lookup(&p.name, &p.dst)?,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(ResolvedDescription { description, pips })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceMeta, PipDesc, WireDesc};

    fn wire(name: &str) -> WireDesc {
        WireDesc {
            name: name.to_string(),
            wire_type: None,
            attrs: Default::default(),
        }
    }

    fn pip(name: &str, src: &str, dst: &str) -> PipDesc {
        PipDesc {
            name: name.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            pip_type: None,
            attrs: Default::default(),
        }
    }

    #[test]
    fn resolves_endpoints_to_indices() {
        let desc = DeviceDescription {
            device: DeviceMeta {
                family: "generic".into(),
                name: "d".into(),
            },
            sites: vec![],
            wires: vec![wire("W0"), wire("W1"), wire("W2")],
            pips: vec![pip("P0", "W2", "W0"), pip("P1", "W0", "W1")],
        };
        let resolved = resolve_description(&desc).unwrap();
        assert_eq!(resolved.pips, vec![
            ResolvedPip { src: 2, dst: 0 },
            ResolvedPip { src: 0, dst: 1 },
        ]);
    }

    #[test]
    fn unknown_src_reported() {
        let desc = DeviceDescription {
            device: DeviceMeta {
                family: "generic".into(),
                name: "d".into(),
            },
            sites: vec![],
            wires: vec![wire("W0")],
            pips: vec![pip("P0", "WX", "W0")],
        };
        let err = resolve_description(&desc).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWire { ref pip, ref wire } if pip == "P0" && wire == "WX"));
    }
}
