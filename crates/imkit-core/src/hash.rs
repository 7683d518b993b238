//! Widget identity hashing.
//!
//! Every persistent entity is keyed by a 32-bit MurmurHash3 of its identifier.
//! The seed separates call-site categories so a window and a group sharing a
//! name do not collide.

use std::panic::Location;

pub type Hash = u32;

/// Seeds for the hashed call-site categories.
pub mod seed {
    pub const WINDOW: u32 = 1 << 0;
    pub const GROUP: u32 = 1 << 1;
    pub const POPUP: u32 = 1 << 2;
    pub const CONTEXTUAL: u32 = 1 << 4;
    pub const COMBO: u32 = 1 << 5;
    pub const MENU: u32 = 1 << 6;
    pub const TOOLTIP: u32 = 1 << 7;
}

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

#[inline]
fn mix(mut k: u32) -> u32 {
    k = k.wrapping_mul(C1);
    k = k.rotate_left(15);
    k.wrapping_mul(C2)
}

/// 32-bit MurmurHash3 (x86 variant).
pub fn murmur3_32(bytes: &[u8], seed: u32) -> Hash {
    let mut h = seed;
    let mut blocks = bytes.chunks_exact(4);
    for block in &mut blocks {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= mix(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    let mut k = 0u32;
    if tail.len() >= 3 {
        k ^= (tail[2] as u32) << 16;
    }
    if tail.len() >= 2 {
        k ^= (tail[1] as u32) << 8;
    }
    if !tail.is_empty() {
        k ^= tail[0] as u32;
        h ^= mix(k);
    }

    h ^= bytes.len() as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

pub fn hash_str(name: &str, seed: u32) -> Hash {
    murmur3_32(name.as_bytes(), seed)
}

/// Identity derived from a source location, salted with `salt` so loops can
/// create several entities from the same call site.
pub fn location_hash(location: &Location<'_>, salt: u32) -> Hash {
    let file = murmur3_32(location.file().as_bytes(), location.line());
    murmur3_32(&salt.to_le_bytes(), file ^ location.column())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
        assert_eq!(murmur3_32(b"", 0xffff_ffff), 0x81f1_6f39);
        assert_eq!(murmur3_32(b"test", 0), 0xba6b_d213);
        assert_eq!(murmur3_32(b"Hello, world!", 1234), 0xfaf6_cdb3);
        assert_eq!(
            murmur3_32(b"The quick brown fox jumps over the lazy dog", 0x9747_b28c),
            0x2fa8_26cd
        );
    }

    #[test]
    fn seeds_separate_categories() {
        assert_ne!(hash_str("Demo", seed::WINDOW), hash_str("Demo", seed::GROUP));
    }

    #[test]
    fn location_salt_distinguishes_loop_iterations() {
        let here = Location::caller();
        assert_ne!(location_hash(here, 0), location_hash(here, 1));
        assert_eq!(location_hash(here, 3), location_hash(here, 3));
    }
}
