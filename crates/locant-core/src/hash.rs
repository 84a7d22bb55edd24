//! Murmur3-derived 32-bit hashing of schema member names.
//!
//! Any stable 32-bit hash works here; the only requirements are determinism
//! and speed. Collisions are tolerated -- `ClassDescriptor` detects them at
//! first use and falls back to a byte-for-byte compare for every member
//! (see `locations::find_name`), so correctness never depends on hash
//! quality. Hand-rolled the way the original C++ implementation hand-rolls
//! its own `daw_murmur3.h`, rather than pulled in as a dependency.

const SEED: u32 = 0x9747_b28c;
const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Hash a schema member name the way the build-time schema descriptor does,
/// one 32-bit lane, MurmurOAAT/Murmur3-finalizer derived.
#[must_use]
pub const fn name_hash(name: &[u8]) -> u32 {
    let mut hash = SEED;
    let len = name.len();
    let mut i = 0;

    while i + 4 <= len {
        let mut k = u32::from_le_bytes([name[i], name[i + 1], name[i + 2], name[i + 3]]);
        k = k.wrapping_mul(C1);
        k = k.rotate_left(15);
        k = k.wrapping_mul(C2);
        hash ^= k;
        hash = hash.rotate_left(13);
        hash = hash.wrapping_mul(5).wrapping_add(0xe654_6b64);
        i += 4;
    }

    let mut rem = [0u8; 4];
    let mut j = 0;
    while i + j < len {
        rem[j] = name[i + j];
        j += 1;
    }
    if j > 0 {
        let mut k = u32::from_le_bytes(rem);
        k = k.wrapping_mul(C1);
        k = k.rotate_left(15);
        k = k.wrapping_mul(C2);
        hash ^= k;
    }

    hash ^= len as u32;
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;
    hash
}

/// Scan a schema's member hashes for any collision, triggering strict
/// byte-compare lookup mode when found.
#[must_use]
pub fn hashes_collide(hashes: &[u32]) -> bool {
    for (i, a) in hashes.iter().enumerate() {
        for b in &hashes[i + 1..] {
            if a == b {
                return true;
            }
        }
    }
    false
}
