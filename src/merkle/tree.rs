//! Layered Merkle tree with inclusion branches

use super::merkleizer::chunk_depth;
use super::zero::{hash_pair, zero_hash};
use crate::error::EncodeError;
use crate::model::Root;
use crate::Result;

/// A Merkle tree kept as its occupied layers, leaves first
///
/// Each layer is half the width of the one below; slots past the occupied
/// prefix are implicit zero subtrees.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    layers: Vec<Vec<Root>>,
    depth: usize,
}

impl MerkleTree {
    /// Build the tree over `chunks` padded to `next_pow2(limit)` leaves
    pub fn build(chunks: &[Root], limit: usize) -> Result<Self> {
        if chunks.len() > limit {
            return Err(EncodeError::LengthExceedsCapacity {
                len: chunks.len(),
                max: limit,
            }
            .into());
        }
        let depth = chunk_depth(limit)?;

        let mut layers = Vec::with_capacity(depth + 1);
        layers.push(chunks.to_vec());
        for level in 0..depth {
            let below = &layers[level];
            let pairs = below.chunks_exact(2);
            let odd = pairs.remainder().first().copied();
            let mut parents: Vec<Root> = pairs
                .map(|pair| hash_pair(&pair[0], &pair[1]))
                .collect();
            if let Some(left) = odd {
                parents.push(hash_pair(&left, &zero_hash(level)));
            }
            layers.push(parents);
        }

        Ok(MerkleTree { layers, depth })
    }

    /// The tree root
    pub fn root(&self) -> Root {
        self.layers[self.depth]
            .first()
            .copied()
            .unwrap_or_else(|| zero_hash(self.depth))
    }

    /// Number of levels above the leaves
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of occupied leaves
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Sibling hashes from the leaf at `index` up to the root
    pub fn branch(&self, index: usize) -> Option<Vec<Root>> {
        if index >= self.leaf_count() {
            return None;
        }
        let mut branch = Vec::with_capacity(self.depth);
        let mut position = index;
        for level in 0..self.depth {
            let sibling = position ^ 1;
            let node = self.layers[level]
                .get(sibling)
                .copied()
                .unwrap_or_else(|| zero_hash(level));
            branch.push(node);
            position >>= 1;
        }
        Some(branch)
    }
}

/// Recompute a root from a leaf, its branch and its generalized position
pub fn root_from_branch(leaf: Root, branch: &[Root], index: usize) -> Root {
    let mut value = leaf;
    let mut position = index;
    for sibling in branch {
        value = if position & 1 == 1 {
            hash_pair(sibling, &value)
        } else {
            hash_pair(&value, sibling)
        };
        position >>= 1;
    }
    value
}

/// Check that `leaf` sits at `index` under `root`
pub fn verify_branch(leaf: Root, branch: &[Root], index: usize, root: Root) -> bool {
    root_from_branch(leaf, branch, index) == root
}
