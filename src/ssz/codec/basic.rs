//! Scalar codec: unsigned integers, booleans and fixed-width byte arrays

use crate::constants::BYTES_PER_CHUNK;
use crate::error::DecodeError;
use crate::model::{FixedBytes, Root};
use crate::ssz::{Kind, SimpleSerialize, TreeHasher};
use crate::Result;

/// A scalar's little-endian bytes in the low end of one zeroed chunk
pub(crate) fn scalar_chunk(le_bytes: &[u8]) -> Root {
    let mut chunk = [0u8; BYTES_PER_CHUNK];
    chunk[..le_bytes.len()].copy_from_slice(le_bytes);
    Root::from_bytes(chunk)
}

fn exact<const N: usize>(bytes: &[u8]) -> std::result::Result<[u8; N], DecodeError> {
    bytes
        .try_into()
        .map_err(|_| DecodeError::FixedWidthMismatch {
            expected: N,
            actual: bytes.len(),
        })
}

macro_rules! impl_uint {
    ($($ty:ty),* $(,)?) => {$(
        impl SimpleSerialize for $ty {
            const KIND: Kind = Kind::Uint { width: std::mem::size_of::<$ty>() };

            fn ssz_len(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }

            fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
                Ok(<$ty>::from_le_bytes(exact(bytes)?))
            }

            fn hash_tree_root_with(&self, _hasher: &TreeHasher<'_>) -> Result<Root> {
                Ok(scalar_chunk(&self.to_le_bytes()))
            }
        }
    )*};
}

impl_uint!(u8, u16, u32, u64, u128);

impl SimpleSerialize for bool {
    const KIND: Kind = Kind::Bool;

    fn ssz_len(&self) -> usize {
        1
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.push(u8::from(*self));
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        match exact::<1>(bytes)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(DecodeError::InvalidBoolean(other)),
        }
    }

    fn hash_tree_root_with(&self, _hasher: &TreeHasher<'_>) -> Result<Root> {
        Ok(scalar_chunk(&[u8::from(*self)]))
    }
}

/// Shared root for any fixed byte array: its bytes, chunked
fn byte_array_root<T: SimpleSerialize>(bytes: &[u8], hasher: &TreeHasher<'_>) -> Result<Root> {
    T::shape()?;
    hasher.merkleize_packed(bytes, T::KIND.chunk_limit())
}

impl<const N: usize> SimpleSerialize for [u8; N] {
    const KIND: Kind = Kind::Bytes { width: N };

    fn ssz_len(&self) -> usize {
        N
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self);
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        exact(bytes)
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        byte_array_root::<Self>(self, hasher)
    }
}

impl<const N: usize> SimpleSerialize for FixedBytes<N> {
    const KIND: Kind = Kind::Bytes { width: N };

    fn ssz_len(&self) -> usize {
        N
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        FixedBytes::from_slice(bytes)
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        byte_array_root::<Self>(self.as_bytes(), hasher)
    }
}

impl SimpleSerialize for Root {
    const KIND: Kind = Kind::Bytes {
        width: BYTES_PER_CHUNK,
    };

    fn ssz_len(&self) -> usize {
        BYTES_PER_CHUNK
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        Root::from_slice(bytes)
    }

    fn hash_tree_root_with(&self, _hasher: &TreeHasher<'_>) -> Result<Root> {
        Ok(*self)
    }
}

impl<T: SimpleSerialize> SimpleSerialize for Box<T> {
    const KIND: Kind = T::KIND;

    fn ssz_len(&self) -> usize {
        self.as_ref().ssz_len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        self.as_ref().ssz_append(buf)
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        T::from_ssz_bytes(bytes).map(Box::new)
    }

    fn hash_tree_root_with(&self, hasher: &TreeHasher<'_>) -> Result<Root> {
        self.as_ref().hash_tree_root_with(hasher)
    }
}
