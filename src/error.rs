//! Error types for beacon_ssz

use thiserror::Error;

/// Result type alias for beacon_ssz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in beacon_ssz operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

/// A type description that no codec can handle.
///
/// These are schema bugs, caught the first time a type is hashed or encoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("unsupported kind: uint of width {0} bytes")]
    UnsupportedWidth(usize),

    #[error("unsupported kind: zero-width byte array")]
    EmptyByteArray,

    #[error("unsupported kind: vector of length 0")]
    EmptyVector,

    #[error("unsupported kind: container without fields")]
    EmptyContainer,

    #[error("unsupported kind: limit of {chunks} chunks exceeds tree depth {max_depth}")]
    LimitTooLarge { chunks: usize, max_depth: usize },
}

/// Rejections raised while decoding untrusted bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated buffer: needed {needed} bytes, got {available}")]
    TruncatedBuffer { needed: usize, available: usize },

    #[error("invalid offset order: {offset} follows {previous}")]
    InvalidOffsetOrder { previous: usize, offset: usize },

    #[error("offset out of range: {offset} (valid {min}..={max})")]
    OffsetOutOfRange {
        offset: usize,
        min: usize,
        max: usize,
    },

    #[error("length {len} exceeds capacity {max}")]
    LengthExceedsCapacity { len: usize, max: usize },

    #[error("fixed width mismatch: expected {expected} bytes, got {actual}")]
    FixedWidthMismatch { expected: usize, actual: usize },

    #[error("invalid hex prefix: {0:?}")]
    InvalidHexPrefix(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBoolean(u8),

    #[error("invalid utf-8 in string")]
    InvalidUtf8,
}

/// Failures on the encoding side
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("buffer size mismatch: declared {expected} bytes, wrote {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("length {len} exceeds capacity {max}")]
    LengthExceedsCapacity { len: usize, max: usize },

    #[error("vector requires exactly {expected} elements, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },
}
