//! One codec per shape
//!
//! - `basic`: scalars (integers, booleans, fixed byte arrays)
//! - `packed`: vectors and lists of scalars
//! - `roots`: vectors of 32-byte roots
//! - `composite`: offset-table sequences and per-element roots
//! - `container`: struct field layout and field-root merkleization

mod basic;
pub(crate) mod composite;
pub mod container;
pub(crate) mod packed;
pub(crate) mod roots;
