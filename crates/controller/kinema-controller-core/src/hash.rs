//! Stable 32-bit content hashes used as durable identity.
//!
//! Slots, event kinds, and matrix entries are keyed by the hash of a
//! display name, so a rename re-keys live entries instead of breaking
//! persisted references. The function must stay bit-identical forever:
//! files store the hash and readers re-hash names to resolve it.

use serde::{Deserialize, Serialize};

/// CRC-32 (reflected polynomial 0xEDB88320) of a name's bytes.
///
/// Two names collide iff their hashes collide; collisions are an
/// accepted risk and are rejected only where an operation would merge
/// two identities (duplicate slot names).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HashId(pub u32);

const TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
};

impl HashId {
    /// Hash raw bytes.
    pub fn of(bytes: &[u8]) -> Self {
        let mut c = !0u32;
        for &b in bytes {
            c = TABLE[((c ^ u32::from(b)) & 0xFF) as usize] ^ (c >> 8);
        }
        HashId(!c)
    }

    /// Hash a name's UTF-8 bytes.
    pub fn of_name(name: &str) -> Self {
        Self::of(name.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_vectors() {
        // Standard CRC-32 check value.
        assert_eq!(HashId::of(b"123456789"), HashId(0xCBF4_3926));
        assert_eq!(HashId::of(b""), HashId(0));
    }

    #[test]
    fn name_identity_is_stable() {
        assert_eq!(HashId::of_name("Walk"), HashId::of_name("Walk"));
        assert_ne!(HashId::of_name("Walk"), HashId::of_name("Run"));
    }
}
