//! Ready-made hash functions matching the table's `Fn(&[u8]) -> u64`
//! contract. Any deterministic function of the key bytes works; these two
//! cover the common cases (a solid general-purpose hash and a deliberately
//! weak one for exercising collision handling).

/// FNV-1a over the key bytes. Good distribution for short string keys and
/// the recommended default.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Wrapping sum of the key bytes. Weak on purpose: keys whose byte sums
/// differ by a multiple of the capacity share a slot, which makes chain
/// behavior easy to provoke in tests and demos.
pub fn byte_sum(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| acc.wrapping_add(b as u64))
}
