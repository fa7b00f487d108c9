//! # beacon_ssz
//!
//! SimpleSerialize encoding and Merkle hash tree roots for beacon chain
//! records.
//!
//! ## Core Concepts
//!
//! - **Kinds and shapes**: every type declares a static [`ssz::Kind`]; the
//!   classifier resolves it to one [`ssz::Shape`], which picks the codec
//! - **Merkleization**: 32-byte chunks, zero-hash padding to a power of two,
//!   length mix-in for bounded lists
//! - **Hash cache**: optional, bounded memoization of subtree roots, enabled
//!   per [`Engine`] through [`EngineConfig`]
//! - **Records**: blocks, bodies, headers, payloads, withdrawals, deposits
//!
//! ## Example
//!
//! ```ignore
//! use beacon_ssz::{Engine, EngineConfig, types::BeaconBlock};
//!
//! let engine = Engine::new(&EngineConfig::cached());
//! let block: BeaconBlock = engine.unmarshal(&bytes)?;
//! let header = engine.block_header(&block)?;
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod merkle;
pub mod model;
pub mod service;
pub mod ssz;
pub mod types;

mod engine;

pub use cache::{CacheStats, HashCache, RootCache};
pub use config::{CacheConfig, EngineConfig};
pub use engine::Engine;
pub use error::{ClassificationError, DecodeError, EncodeError, Error, Result};
pub use model::Root;
pub use ssz::{Shape, SimpleSerialize, TreeHasher};
