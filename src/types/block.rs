//! Beacon block and header derivation

use super::body::{BeaconBlockBody, ForkVersion};
use super::header::BeaconBlockHeader;
use crate::error::DecodeError;
use crate::model::Root;
use crate::ssz::{Kind, SimpleSerialize, TreeHasher};
use crate::ssz_container;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlock {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Root,
    pub state_root: Root,
    pub body: Box<BeaconBlockBody>,
}

ssz_container!(BeaconBlock {
    slot: u64,
    proposer_index: u64,
    parent_root: Root,
    state_root: Root,
    body: Box<BeaconBlockBody>,
});

impl BeaconBlock {
    /// Bytes before the body, including the body's offset
    pub const FIXED_PART_LEN: usize = Kind::fixed_part_len(&[
        <u64 as SimpleSerialize>::KIND,
        <u64 as SimpleSerialize>::KIND,
        <Root as SimpleSerialize>::KIND,
        <Root as SimpleSerialize>::KIND,
        <BeaconBlockBody as SimpleSerialize>::KIND,
    ]);

    /// Empty block for `version` with no state root yet
    pub fn new_with_version(
        slot: u64,
        proposer_index: u64,
        parent_root: Root,
        version: ForkVersion,
    ) -> Self {
        BeaconBlock {
            slot,
            proposer_index,
            parent_root,
            state_root: Root::ZERO,
            body: Box::new(BeaconBlockBody::with_version(version)),
        }
    }

    /// Decode a block and tag its body with `version`
    pub fn from_ssz(bytes: &[u8], version: ForkVersion) -> std::result::Result<Self, DecodeError> {
        let mut block = BeaconBlock::from_ssz_bytes(bytes)?;
        block.body.set_version(version);
        Ok(block)
    }

    pub fn version(&self) -> ForkVersion {
        self.body.version()
    }

    pub fn set_state_root(&mut self, root: Root) {
        self.state_root = root;
    }

    pub fn body(&self) -> &BeaconBlockBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut BeaconBlockBody {
        &mut self.body
    }

    /// Encoded size: the fixed part plus the body
    pub fn size_ssz(&self) -> usize {
        Self::FIXED_PART_LEN + self.body.ssz_len()
    }

    /// Derive the header, hashing the body as it is now
    pub fn header(&self) -> Result<BeaconBlockHeader> {
        self.header_with(&TreeHasher::uncached())
    }

    pub fn header_with(&self, hasher: &TreeHasher<'_>) -> Result<BeaconBlockHeader> {
        let body_root = self.body.hash_tree_root_with(hasher)?;
        Ok(BeaconBlockHeader::new(
            self.slot,
            self.proposer_index,
            self.parent_root,
            self.state_root,
            body_root,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FixedBytes;
    use crate::types::{transactions_from_bytes, Deposit};

    fn block() -> BeaconBlock {
        let mut block =
            BeaconBlock::new_with_version(9, 4, Root::from_bytes([7; 32]), ForkVersion::DENEB);
        block.set_state_root(Root::from_bytes([8; 32]));
        block.body_mut().graffiti = Root::from_bytes([1; 32]);
        block.body_mut().execution_payload.transactions =
            transactions_from_bytes(&[vec![0xaau8; 40]]).unwrap();
        block
    }

    #[test]
    fn test_fixed_part_len() {
        assert_eq!(BeaconBlock::FIXED_PART_LEN, 84);
    }

    #[test]
    fn test_size_matches_encoding() {
        let block = block();
        let bytes = block.as_ssz_bytes();
        assert_eq!(block.size_ssz(), bytes.len());
        assert_eq!(block.ssz_len(), bytes.len());
        assert_eq!(&bytes[80..84], &84u32.to_le_bytes());
    }

    #[test]
    fn test_from_ssz_attaches_version() {
        let original = block();
        let decoded = BeaconBlock::from_ssz(&original.as_ssz_bytes(), ForkVersion::DENEB).unwrap();
        assert_eq!(decoded.version(), ForkVersion::DENEB);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_header_tracks_body() {
        let mut block = block();
        let header = block.header().unwrap();
        assert_eq!(header.body_root, block.body().hash_tree_root().unwrap());
        assert_eq!(header.slot, 9);
        assert_eq!(header.state_root, Root::from_bytes([8; 32]));

        block.body_mut().deposits.push(Deposit::default()).unwrap();
        block
            .body_mut()
            .blob_kzg_commitments
            .push(FixedBytes([3; 48]))
            .unwrap();
        let updated = block.header().unwrap();
        assert_ne!(updated.body_root, header.body_root);
        assert_eq!(updated.body_root, block.body().hash_tree_root().unwrap());
    }

    #[test]
    fn test_block_root_commits_to_header_fields() {
        // a block and its header share a root
        let block = block();
        let header = block.header().unwrap();
        assert_eq!(block.hash_tree_root().unwrap(), header.hash_tree_root().unwrap());
    }
}
