//! Encoding constants and the chain-spec limits consumed by the record types.

/// Number of bytes per Merkle chunk.
pub const BYTES_PER_CHUNK: usize = 32;

/// Number of bytes per serialized offset in a fixed region.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Deepest tree the zero-hash table covers. Limits needing more are rejected.
pub const MAX_MERKLE_DEPTH: usize = 48;

/// Maximum number of transactions per execution payload. Set to 2**20.
pub const MAX_TRANSACTIONS_PER_PAYLOAD: usize = 1 << 20;

/// Maximum number of bytes per opaque transaction. Set to 2**30.
pub const MAX_BYTES_PER_TRANSACTION: usize = 1 << 30;

/// Maximum number of withdrawals per execution payload.
pub const MAX_WITHDRAWALS_PER_PAYLOAD: usize = 16;

/// Maximum number of deposits per block body.
pub const MAX_DEPOSITS_PER_BLOCK: usize = 16;

/// Maximum number of blob KZG commitments per block body.
pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 16;

/// Width of the execution logs bloom filter.
pub const BYTES_PER_LOGS_BLOOM: usize = 256;

/// Maximum length of the execution payload extra data.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_fit_the_zero_hash_table() {
        let tx_chunks = MAX_BYTES_PER_TRANSACTION / BYTES_PER_CHUNK;
        assert!(tx_chunks.ilog2() as usize <= MAX_MERKLE_DEPTH);
        assert!(MAX_TRANSACTIONS_PER_PAYLOAD.ilog2() as usize <= MAX_MERKLE_DEPTH);
    }
}
