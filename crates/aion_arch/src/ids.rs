//! Opaque ID newtypes for device resources and design objects.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Hash`, and `Serialize`/`Deserialize`.
//! The raw value `u32::MAX` is reserved as [`INVALID`](SiteId::INVALID), the
//! null handle; binding operations reject it.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// The null handle.
            pub const INVALID: Self = Self(u32::MAX);

            /// Creates an ID from a raw `u32` index.
            pub const fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub const fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns `false` for the null handle.
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.is_valid() {
                    write!(f, "{}", self.0)
                } else {
                    f.write_str("<invalid>")
                }
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a site (placement location) in the device.
    SiteId
);

define_id!(
    /// Opaque, copyable ID for a routing wire in the device fabric.
    WireId
);

define_id!(
    /// Opaque, copyable ID for a programmable interconnect point (PIP) driving a wire.
    PipId
);

define_id!(
    /// Opaque, copyable ID for a group of device resources.
    GroupId
);

define_id!(
    /// Opaque, copyable ID for a graphical decal.
    DecalId
);

define_id!(
    /// Opaque, copyable ID for a cell in the design [`Netlist`](crate::Netlist).
    CellId
);

define_id!(
    /// Opaque, copyable ID for a net in the design [`Netlist`](crate::Netlist).
    NetId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = SiteId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert!(id.is_valid());
    }

    #[test]
    fn invalid_is_max() {
        assert_eq!(WireId::INVALID.as_raw(), u32::MAX);
        assert!(!WireId::INVALID.is_valid());
        assert!(!WireId::from_raw(u32::MAX).is_valid());
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(PipId::from_raw(1));
        set.insert(PipId::from_raw(2));
        set.insert(PipId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_display() {
        assert_eq!(format!("{}", NetId::from_raw(7)), "7");
        assert_eq!(format!("{}", CellId::INVALID), "<invalid>");
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = SiteId::from_raw(99);
        let json = serde_json::to_string(&id).unwrap();
        let restored: SiteId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
