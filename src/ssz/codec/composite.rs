//! Sequences of composite elements and the shared sequence layout
//!
//! Fixed-size elements are laid out back to back. Variable-size elements
//! get a 4-byte offset each in a head region, followed by their bodies in
//! the same order. Offsets are checked on decode: the first must point just
//! past the head, each must not precede the one before it, and none may
//! point past the buffer.

use crate::constants::BYTES_PER_LENGTH_OFFSET;
use crate::error::DecodeError;
use crate::model::Root;
use crate::ssz::{SimpleSerialize, TreeHasher};
use crate::Result;

/// Read the little-endian offset stored at `at`
pub(crate) fn read_offset(bytes: &[u8], at: usize) -> std::result::Result<usize, DecodeError> {
    let end = at + BYTES_PER_LENGTH_OFFSET;
    let raw: [u8; BYTES_PER_LENGTH_OFFSET] = bytes
        .get(at..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::TruncatedBuffer {
            needed: end,
            available: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(raw) as usize)
}

/// Check `offset` against its predecessor and the buffer end
pub(crate) fn check_offset(
    offset: usize,
    previous: usize,
    len: usize,
) -> std::result::Result<(), DecodeError> {
    if offset < previous {
        return Err(DecodeError::InvalidOffsetOrder { previous, offset });
    }
    if offset > len {
        return Err(DecodeError::OffsetOutOfRange {
            offset,
            min: previous,
            max: len,
        });
    }
    Ok(())
}

/// Encoded length of a sequence
pub(crate) fn encoded_len<T: SimpleSerialize>(items: &[T]) -> usize {
    if T::is_fixed_size() {
        items.len() * T::ssz_fixed_len()
    } else {
        items
            .iter()
            .map(|item| BYTES_PER_LENGTH_OFFSET + item.ssz_len())
            .sum()
    }
}

/// Append a sequence, with an offset table when elements vary in size
pub(crate) fn encode<T: SimpleSerialize>(items: &[T], buf: &mut Vec<u8>) {
    if T::is_fixed_size() {
        for item in items {
            item.ssz_append(buf);
        }
        return;
    }

    let mut offset = items.len() * BYTES_PER_LENGTH_OFFSET;
    for item in items {
        buf.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += item.ssz_len();
    }
    for item in items {
        item.ssz_append(buf);
    }
}

/// Decode a sequence of at most `max` elements
pub(crate) fn decode_list<T: SimpleSerialize>(
    bytes: &[u8],
    max: usize,
) -> std::result::Result<Vec<T>, DecodeError> {
    if T::is_fixed_size() {
        let count = fixed_count::<T>(bytes)?;
        if count > max {
            return Err(DecodeError::LengthExceedsCapacity { len: count, max });
        }
        return decode_fixed(bytes);
    }

    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let first = read_offset(bytes, 0)?;
    if first == 0 || first % BYTES_PER_LENGTH_OFFSET != 0 || first > bytes.len() {
        return Err(DecodeError::OffsetOutOfRange {
            offset: first,
            min: BYTES_PER_LENGTH_OFFSET,
            max: bytes.len(),
        });
    }
    let count = first / BYTES_PER_LENGTH_OFFSET;
    if count > max {
        return Err(DecodeError::LengthExceedsCapacity { len: count, max });
    }
    decode_variable(bytes, count)
}

/// Decode a sequence of exactly `len` elements
pub(crate) fn decode_vector<T: SimpleSerialize>(
    bytes: &[u8],
    len: usize,
) -> std::result::Result<Vec<T>, DecodeError> {
    if T::is_fixed_size() {
        let expected = len * T::ssz_fixed_len();
        if bytes.len() != expected {
            return Err(DecodeError::FixedWidthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        return decode_fixed(bytes);
    }

    let head = len * BYTES_PER_LENGTH_OFFSET;
    if bytes.len() < head {
        return Err(DecodeError::TruncatedBuffer {
            needed: head,
            available: bytes.len(),
        });
    }
    let first = read_offset(bytes, 0)?;
    if first != head {
        return Err(DecodeError::OffsetOutOfRange {
            offset: first,
            min: head,
            max: head,
        });
    }
    decode_variable(bytes, len)
}

fn fixed_count<T: SimpleSerialize>(bytes: &[u8]) -> std::result::Result<usize, DecodeError> {
    let size = T::ssz_fixed_len();
    if size == 0 {
        return Ok(0);
    }
    if bytes.len() % size != 0 {
        return Err(DecodeError::FixedWidthMismatch {
            expected: bytes.len() - bytes.len() % size,
            actual: bytes.len(),
        });
    }
    Ok(bytes.len() / size)
}

fn decode_fixed<T: SimpleSerialize>(bytes: &[u8]) -> std::result::Result<Vec<T>, DecodeError> {
    let size = T::ssz_fixed_len();
    if size == 0 {
        return Ok(Vec::new());
    }
    bytes
        .chunks_exact(size)
        .map(T::from_ssz_bytes)
        .collect()
}

/// Decode `count` variable-size elements whose first offset is already checked
fn decode_variable<T: SimpleSerialize>(
    bytes: &[u8],
    count: usize,
) -> std::result::Result<Vec<T>, DecodeError> {
    let mut offsets = Vec::with_capacity(count);
    let mut previous = count * BYTES_PER_LENGTH_OFFSET;
    for i in 0..count {
        let offset = read_offset(bytes, i * BYTES_PER_LENGTH_OFFSET)?;
        check_offset(offset, previous, bytes.len())?;
        offsets.push(offset);
        previous = offset;
    }

    let mut items = Vec::with_capacity(count);
    for (i, start) in offsets.iter().enumerate() {
        let end = offsets.get(i + 1).copied().unwrap_or(bytes.len());
        items.push(T::from_ssz_bytes(&bytes[*start..end])?);
    }
    Ok(items)
}

/// Hash every element to its own root
pub(crate) fn element_roots<T: SimpleSerialize>(
    items: &[T],
    hasher: &TreeHasher<'_>,
) -> Result<Vec<Root>> {
    items
        .iter()
        .map(|item| item.hash_tree_root_with(hasher))
        .collect()
}

/// Root over per-element roots in a tree sized for `capacity` elements
pub(crate) fn hash_tree_root<T: SimpleSerialize>(
    items: &[T],
    capacity: usize,
    hasher: &TreeHasher<'_>,
) -> Result<Root> {
    hasher.merkleize(&element_roots(items, hasher)?, capacity)
}
