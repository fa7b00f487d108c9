//! Beacon block body

use super::deposit::Deposits;
use super::eth1_data::Eth1Data;
use super::execution_payload::ExecutionPayload;
use crate::constants::MAX_BLOB_COMMITMENTS_PER_BLOCK;
use crate::merkle::{chunk_depth, length_chunk, MerkleTree};
use crate::model::{BlsSignature, KzgCommitment, Root};
use crate::ssz::{List, SimpleSerialize, TreeHasher};
use crate::ssz_container;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of `blob_kzg_commitments` among the body's fields
pub const BLOB_KZG_COMMITMENTS_INDEX: usize = 5;

const BODY_FIELDS: usize = 6;

/// Fork tag attached to a decoded body
///
/// Never encoded or hashed; interpreting it is the caller's business.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForkVersion(pub u32);

impl ForkVersion {
    pub const DENEB: ForkVersion = ForkVersion(4);
}

impl fmt::Display for ForkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ForkVersion {
    fn from(version: u32) -> Self {
        ForkVersion(version)
    }
}

pub type BlobKzgCommitments = List<KzgCommitment, MAX_BLOB_COMMITMENTS_PER_BLOCK>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockBody {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub deposits: Deposits,
    pub execution_payload: ExecutionPayload,
    pub blob_kzg_commitments: BlobKzgCommitments,
    #[serde(skip)]
    pub(crate) version: ForkVersion,
}

ssz_container!(
    BeaconBlockBody {
        randao_reveal: BlsSignature,
        eth1_data: Eth1Data,
        graffiti: Root,
        deposits: Deposits,
        execution_payload: ExecutionPayload,
        blob_kzg_commitments: BlobKzgCommitments,
    }
    skip { version }
);

impl BeaconBlockBody {
    pub fn with_version(version: ForkVersion) -> Self {
        BeaconBlockBody {
            version,
            ..Default::default()
        }
    }

    pub fn version(&self) -> ForkVersion {
        self.version
    }

    pub fn set_version(&mut self, version: ForkVersion) {
        self.version = version;
    }

    /// Roots of the body's fields in declared order
    pub fn field_roots(&self, hasher: &TreeHasher<'_>) -> Result<Vec<Root>> {
        Ok(vec![
            self.randao_reveal.hash_tree_root_with(hasher)?,
            self.eth1_data.hash_tree_root_with(hasher)?,
            self.graffiti.hash_tree_root_with(hasher)?,
            self.deposits.hash_tree_root_with(hasher)?,
            self.execution_payload.hash_tree_root_with(hasher)?,
            self.blob_kzg_commitments.hash_tree_root_with(hasher)?,
        ])
    }

    /// Branch proving the commitment at `index` against the body root
    ///
    /// Runs through the commitment list tree, the list's length chunk and
    /// then the body's field tree. `None` when there is no such commitment.
    pub fn kzg_commitment_inclusion_proof(
        &self,
        index: usize,
        hasher: &TreeHasher<'_>,
    ) -> Result<Option<Vec<Root>>> {
        if index >= self.blob_kzg_commitments.len() {
            return Ok(None);
        }
        let leaves = self
            .blob_kzg_commitments
            .iter()
            .map(|commitment| commitment.hash_tree_root_with(hasher))
            .collect::<Result<Vec<_>>>()?;
        let list_tree = MerkleTree::build(&leaves, MAX_BLOB_COMMITMENTS_PER_BLOCK)?;
        let body_tree = MerkleTree::build(&self.field_roots(hasher)?, BODY_FIELDS)?;

        let (Some(mut branch), Some(upper)) = (
            list_tree.branch(index),
            body_tree.branch(BLOB_KZG_COMMITMENTS_INDEX),
        ) else {
            return Ok(None);
        };
        branch.push(length_chunk(leaves.len()));
        branch.extend(upper);
        Ok(Some(branch))
    }
}

/// Leaf position to verify commitment `index` with, under the body root
pub fn kzg_commitment_position(index: usize) -> Result<usize> {
    let depth = chunk_depth(MAX_BLOB_COMMITMENTS_PER_BLOCK)?;
    Ok(index | (BLOB_KZG_COMMITMENTS_INDEX << (depth + 1)))
}
