//! Binary Merkle trees over 32-byte chunks
//!
//! - Leaves are 32-byte chunks; scalars narrower than a chunk are packed
//! - Layers are padded to a power of two using precomputed zero hashes
//! - Bounded containers mix their element count into the root

mod merkleizer;
mod tree;
mod zero;

pub use merkleizer::{
    chunk_count, chunk_depth, length_chunk, merkleize_byte_slice, merkleize_chunks,
    merkleize_list_of_composites, merkleize_packed, mix_in_length, pack_bytes,
};
pub use tree::{root_from_branch, verify_branch, MerkleTree};
pub use zero::{hash_pair, zero_hash};
