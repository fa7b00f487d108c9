//! Chunk merkleization, byte packing and length mix-in

use super::zero::{hash_pair, zero_hash};
use crate::constants::{BYTES_PER_CHUNK, MAX_MERKLE_DEPTH};
use crate::error::{ClassificationError, EncodeError};
use crate::model::Root;
use crate::Result;

/// Depth of a tree whose padded leaf layer holds `limit` chunks
pub const fn chunk_depth(limit: usize) -> std::result::Result<usize, ClassificationError> {
    let leaves = if limit == 0 { 1 } else { limit };
    match leaves.checked_next_power_of_two() {
        Some(width) if (width.trailing_zeros() as usize) <= MAX_MERKLE_DEPTH => {
            Ok(width.trailing_zeros() as usize)
        }
        _ => Err(ClassificationError::LimitTooLarge {
            chunks: limit,
            max_depth: MAX_MERKLE_DEPTH,
        }),
    }
}

/// Number of chunks needed to hold `bytes` bytes
pub const fn chunk_count(bytes: usize) -> usize {
    bytes.div_ceil(BYTES_PER_CHUNK)
}

/// Split bytes into 32-byte chunks, zero-padding the last one
pub fn pack_bytes(bytes: &[u8]) -> Vec<Root> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = [0u8; BYTES_PER_CHUNK];
            chunk[..piece.len()].copy_from_slice(piece);
            Root::from_bytes(chunk)
        })
        .collect()
}

/// Merkleize `chunks` into a tree padded to `next_pow2(limit)` leaves
///
/// Padding subtrees come from the zero-hash table, so only the occupied
/// part of each layer is hashed.
pub fn merkleize_chunks(chunks: &[Root], limit: usize) -> Result<Root> {
    if chunks.len() > limit {
        return Err(EncodeError::LengthExceedsCapacity {
            len: chunks.len(),
            max: limit,
        }
        .into());
    }
    let depth = chunk_depth(limit)?;
    if chunks.is_empty() {
        return Ok(zero_hash(depth));
    }

    let mut layer = chunks.to_vec();
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero_hash(level));
        }
        let width = layer.len() / 2;
        for i in 0..width {
            layer[i] = hash_pair(&layer[2 * i], &layer[2 * i + 1]);
        }
        layer.truncate(width);
    }
    Ok(layer[0])
}

/// Pack raw bytes into chunks and merkleize them with a chunk limit
pub fn merkleize_packed(bytes: &[u8], limit: usize) -> Result<Root> {
    merkleize_chunks(&pack_bytes(bytes), limit)
}

/// Merkleize a raw byte slice over exactly as many chunks as it fills
pub fn merkleize_byte_slice(bytes: &[u8]) -> Result<Root> {
    let chunks = pack_bytes(bytes);
    let limit = chunks.len();
    merkleize_chunks(&chunks, limit)
}

/// Mix a bounded container's element count into its root
///
/// `hash(root || uint256_le(length))`
pub fn mix_in_length(root: &Root, length: usize) -> Root {
    hash_pair(root, &length_chunk(length))
}

/// The chunk a bounded container's count occupies: `uint256_le(length)`
pub fn length_chunk(length: usize) -> Root {
    let mut chunk = [0u8; BYTES_PER_CHUNK];
    chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    Root::from_bytes(chunk)
}

/// Merkleize per-element roots padded to `max_capacity`, then mix in the count
pub fn merkleize_list_of_composites(element_roots: &[Root], max_capacity: usize) -> Result<Root> {
    let root = merkleize_chunks(element_roots, max_capacity)?;
    Ok(mix_in_length(&root, element_roots.len()))
}
