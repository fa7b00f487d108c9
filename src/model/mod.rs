//! Core value types shared by the codecs and the record layer

mod bytes;
pub mod hex;
mod root;

pub use bytes::{BlsPubkey, BlsSignature, ExecutionAddress, FixedBytes, KzgCommitment, U256Le};
pub use root::Root;
