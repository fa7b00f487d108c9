//! 0x-prefixed hex text, the textual form of roots and byte arrays

use crate::error::DecodeError;

const PREFIX: &str = "0x";

/// Encode bytes as lowercase hex with a `0x` prefix
pub fn encode(bytes: &[u8]) -> String {
    format!("{}{}", PREFIX, hex::encode(bytes))
}

/// Strip the `0x` prefix (case-insensitive) from a hex string
pub fn strip_prefix(text: &str) -> Result<&str, DecodeError> {
    match text.get(..PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(PREFIX) => Ok(&text[PREFIX.len()..]),
        _ => Err(DecodeError::InvalidHexPrefix(text.chars().take(8).collect())),
    }
}

/// Decode `0x`-prefixed hex text into bytes
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = strip_prefix(text.trim())?;
    hex::decode(digits).map_err(|e| DecodeError::InvalidHex(e.to_string()))
}

/// Decode `0x`-prefixed hex text into an array of exactly `N` bytes
pub fn decode_fixed<const N: usize>(text: &str) -> Result<[u8; N], DecodeError> {
    let bytes = decode(text)?;
    if bytes.len() != N {
        return Err(DecodeError::FixedWidthMismatch {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
