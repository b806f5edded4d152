//! Checksums over opaque device handles.

/// Computes a 32-bit checksum of a raw handle index using XXH3.
///
/// Used for the default site, wire, and pip checksums, which only need to be
/// stable for a given handle, not meaningful across devices.
pub fn handle_checksum(raw: u32) -> u32 {
    let hash = xxhash_rust::xxh3::xxh3_64(&raw.to_le_bytes());
    (hash ^ (hash >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(handle_checksum(17), handle_checksum(17));
    }

    #[test]
    fn different_handles_differ() {
        assert_ne!(handle_checksum(0), handle_checksum(1));
        assert_ne!(handle_checksum(1), handle_checksum(u32::MAX));
    }
}
