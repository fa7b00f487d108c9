//! SHA-256 pair hashing and the per-depth zero-hash table

use crate::constants::MAX_MERKLE_DEPTH;
use crate::model::Root;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Roots of all-zero subtrees: `ZERO_HASHES[d]` covers `2^d` empty chunks.
static ZERO_HASHES: Lazy<Vec<Root>> = Lazy::new(|| {
    let mut hashes = Vec::with_capacity(MAX_MERKLE_DEPTH + 1);
    hashes.push(Root::ZERO);
    for depth in 0..MAX_MERKLE_DEPTH {
        let below = hashes[depth];
        hashes.push(hash_pair(&below, &below));
    }
    hashes
});

/// SHA-256 of the concatenation of two chunks
pub fn hash_pair(left: &Root, right: &Root) -> Root {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Root::from_bytes(hasher.finalize().into())
}

/// Root of a zero subtree of the given depth
///
/// Callers check the depth against [`MAX_MERKLE_DEPTH`] during classification.
pub fn zero_hash(depth: usize) -> Root {
    ZERO_HASHES[depth.min(MAX_MERKLE_DEPTH)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_zero_hashes() {
        assert!(zero_hash(0).is_zero());
        assert_eq!(
            zero_hash(1).to_hex(),
            "0xf5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
        );
        assert_eq!(
            zero_hash(2).to_hex(),
            "0xdb56114e00fdd4c1f85c892bf35ac9a89289aaecb1ebd0a96cde606a748b5d71"
        );
        assert_eq!(
            zero_hash(3).to_hex(),
            "0xc78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c"
        );
    }

    #[test]
    fn test_table_is_chained() {
        for depth in 0..MAX_MERKLE_DEPTH {
            let below = zero_hash(depth);
            assert_eq!(zero_hash(depth + 1), hash_pair(&below, &below));
        }
    }
}
