//! Static type descriptors and shape classification
//!
//! Every encodable type carries a [`Kind`] as an associated constant. The
//! classifier maps that descriptor onto exactly one [`Shape`], which selects
//! the codec used for encoding, decoding and hashing. Nothing here inspects
//! values at runtime.

use crate::constants::{BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET};
use crate::error::ClassificationError;
use crate::merkle::chunk_depth;
use serde::Serialize;
use std::fmt;

/// The codec family a type resolves to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Scalar,
    FixedVectorOfScalars,
    BoundedListOfScalars,
    FixedVectorOfComposites,
    BoundedListOfComposites,
    RootsArray,
    String,
    Struct,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Scalar => "scalar",
            Shape::FixedVectorOfScalars => "fixed vector of scalars",
            Shape::BoundedListOfScalars => "bounded list of scalars",
            Shape::FixedVectorOfComposites => "fixed vector of composites",
            Shape::BoundedListOfComposites => "bounded list of composites",
            Shape::RootsArray => "roots array",
            Shape::String => "string",
            Shape::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// How a sequence element participates in its parent's tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementClass {
    /// Scalar packed next to its neighbours inside shared chunks
    Packed { width: usize },
    /// 32-byte value that is its own chunk
    Root,
    /// Anything hashed to its own root first
    Composite,
}

/// Element descriptor of a vector or list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    pub class: ElementClass,
    pub fixed_size: Option<usize>,
}

impl Element {
    /// Describe `kind` in its role as a sequence element
    pub const fn of(kind: Kind) -> Element {
        let class = match kind {
            Kind::Uint { width } => ElementClass::Packed { width },
            Kind::Bool => ElementClass::Packed { width: 1 },
            Kind::Bytes { width } if width == BYTES_PER_CHUNK => ElementClass::Root,
            _ => ElementClass::Composite,
        };
        Element {
            class,
            fixed_size: kind.fixed_size(),
        }
    }
}

/// Static description of an encodable type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Little-endian unsigned integer of `width` bytes
    Uint { width: usize },
    Bool,
    /// Fixed-width opaque byte array (roots, addresses, keys)
    Bytes { width: usize },
    /// Exactly `len` elements
    Vector { elem: Element, len: usize },
    /// At most `max` elements
    List { elem: Element, max: usize },
    /// UTF-8 text of at most `max` bytes
    Text { max: usize },
    /// Record with `fields` members in declared order
    Container {
        fields: usize,
        fixed_size: Option<usize>,
    },
}

impl Kind {
    /// Describe a record from its field kinds
    pub const fn container(fields: &[Kind]) -> Kind {
        let mut total = 0usize;
        let mut all_fixed = true;
        let mut i = 0;
        while i < fields.len() {
            match fields[i].fixed_size() {
                Some(size) => total += size,
                None => all_fixed = false,
            }
            i += 1;
        }
        Kind::Container {
            fields: fields.len(),
            fixed_size: if all_fixed { Some(total) } else { None },
        }
    }

    /// Length of the fixed region of a record with these fields
    pub const fn fixed_part_len(fields: &[Kind]) -> usize {
        let mut total = 0usize;
        let mut i = 0;
        while i < fields.len() {
            total += match fields[i].fixed_size() {
                Some(size) => size,
                None => BYTES_PER_LENGTH_OFFSET,
            };
            i += 1;
        }
        total
    }

    /// Encoded size when it does not depend on the value
    pub const fn fixed_size(&self) -> Option<usize> {
        match *self {
            Kind::Uint { width } => Some(width),
            Kind::Bool => Some(1),
            Kind::Bytes { width } => Some(width),
            Kind::Vector { elem, len } => match elem.fixed_size {
                Some(size) => Some(size * len),
                None => None,
            },
            Kind::List { .. } | Kind::Text { .. } => None,
            Kind::Container { fixed_size, .. } => fixed_size,
        }
    }

    pub const fn is_fixed_size(&self) -> bool {
        self.fixed_size().is_some()
    }

    /// Leaf count the padded tree for this kind must accommodate
    pub const fn chunk_limit(&self) -> usize {
        match *self {
            Kind::Uint { .. } | Kind::Bool => 1,
            Kind::Bytes { width } => width.div_ceil(BYTES_PER_CHUNK),
            Kind::Vector { elem, len } => elem_chunks(elem, len),
            Kind::List { elem, max } => elem_chunks(elem, max),
            Kind::Text { max } => max.div_ceil(BYTES_PER_CHUNK),
            Kind::Container { fields, .. } => fields,
        }
    }
}

const fn elem_chunks(elem: Element, count: usize) -> usize {
    match elem.class {
        ElementClass::Packed { width } => count.saturating_mul(width).div_ceil(BYTES_PER_CHUNK),
        ElementClass::Root | ElementClass::Composite => count,
    }
}

/// Resolve the single shape that applies to `kind`
pub const fn classify(kind: &Kind) -> Result<Shape, ClassificationError> {
    let shape = match *kind {
        Kind::Uint { width } => match width {
            1 | 2 | 4 | 8 | 16 | 32 => Shape::Scalar,
            other => return Err(ClassificationError::UnsupportedWidth(other)),
        },
        Kind::Bool => Shape::Scalar,
        Kind::Bytes { width: 0 } => return Err(ClassificationError::EmptyByteArray),
        Kind::Bytes { .. } => Shape::Scalar,
        Kind::Vector { len: 0, .. } => return Err(ClassificationError::EmptyVector),
        Kind::Vector { elem, .. } => match elem.class {
            ElementClass::Root => Shape::RootsArray,
            ElementClass::Packed { .. } => Shape::FixedVectorOfScalars,
            ElementClass::Composite => Shape::FixedVectorOfComposites,
        },
        Kind::List { elem, .. } => match elem.class {
            ElementClass::Packed { .. } => Shape::BoundedListOfScalars,
            ElementClass::Root | ElementClass::Composite => Shape::BoundedListOfComposites,
        },
        Kind::Text { .. } => Shape::String,
        Kind::Container { fields: 0, .. } => return Err(ClassificationError::EmptyContainer),
        Kind::Container { .. } => Shape::Struct,
    };

    match chunk_depth(kind.chunk_limit()) {
        Ok(_) => Ok(shape),
        Err(err) => Err(err),
    }
}
