//! Struct codec
//!
//! Fields are written in declared order. Fixed-size fields sit inline in the
//! fixed region; each variable-size field puts a 4-byte offset there and its
//! bytes in the variable region that follows. The root is the merkleization
//! of the field roots, with no length mix-in.

use super::composite::{check_offset, read_offset};
use crate::constants::BYTES_PER_LENGTH_OFFSET;
use crate::error::DecodeError;
use crate::ssz::SimpleSerialize;

/// Bytes a field contributes to its container's encoding
pub fn field_len<T: SimpleSerialize>(value: &T) -> usize {
    if T::is_fixed_size() {
        T::ssz_fixed_len()
    } else {
        BYTES_PER_LENGTH_OFFSET + value.ssz_len()
    }
}

/// Writes a container's fixed region directly and buffers its variable region
pub struct ContainerEncoder<'a> {
    buf: &'a mut Vec<u8>,
    fixed_part_len: usize,
    variable: Vec<u8>,
}

impl<'a> ContainerEncoder<'a> {
    pub fn new(buf: &'a mut Vec<u8>, fixed_part_len: usize) -> Self {
        ContainerEncoder {
            buf,
            fixed_part_len,
            variable: Vec::new(),
        }
    }

    pub fn append<T: SimpleSerialize>(&mut self, value: &T) {
        if T::is_fixed_size() {
            value.ssz_append(self.buf);
        } else {
            let offset = self.fixed_part_len + self.variable.len();
            self.buf.extend_from_slice(&(offset as u32).to_le_bytes());
            value.ssz_append(&mut self.variable);
        }
    }

    pub fn finish(self) {
        self.buf.extend_from_slice(&self.variable);
    }
}

/// Splits a container encoding into per-field slices, validating offsets
pub struct ContainerDecoder<'a> {
    fields: std::vec::IntoIter<&'a [u8]>,
}

impl<'a> ContainerDecoder<'a> {
    /// `layout` lists each field's fixed size, or `None` for variable-size fields
    pub fn new(bytes: &'a [u8], layout: &[Option<usize>]) -> Result<Self, DecodeError> {
        let fixed_part_len: usize = layout
            .iter()
            .map(|size| size.unwrap_or(BYTES_PER_LENGTH_OFFSET))
            .sum();
        if bytes.len() < fixed_part_len {
            return Err(DecodeError::TruncatedBuffer {
                needed: fixed_part_len,
                available: bytes.len(),
            });
        }

        // Fixed fields resolve immediately; variable ones remember their offset.
        enum Slot<'b> {
            Fixed(&'b [u8]),
            Variable(usize),
        }
        let mut slots = Vec::with_capacity(layout.len());
        let mut position = 0;
        let mut previous: Option<usize> = None;
        for size in layout {
            match size {
                Some(size) => {
                    slots.push(Slot::Fixed(&bytes[position..position + size]));
                    position += size;
                }
                None => {
                    let offset = read_offset(bytes, position)?;
                    match previous {
                        None if offset != fixed_part_len => {
                            return Err(DecodeError::OffsetOutOfRange {
                                offset,
                                min: fixed_part_len,
                                max: fixed_part_len,
                            });
                        }
                        None => {}
                        Some(previous) => check_offset(offset, previous, bytes.len())?,
                    }
                    previous = Some(offset);
                    slots.push(Slot::Variable(offset));
                    position += BYTES_PER_LENGTH_OFFSET;
                }
            }
        }

        if previous.is_none() && bytes.len() != fixed_part_len {
            return Err(DecodeError::FixedWidthMismatch {
                expected: fixed_part_len,
                actual: bytes.len(),
            });
        }

        let offsets: Vec<usize> = slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Variable(offset) => Some(*offset),
                Slot::Fixed(_) => None,
            })
            .collect();
        let mut next_variable = 0;
        let fields = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Fixed(field) => field,
                Slot::Variable(start) => {
                    next_variable += 1;
                    let end = offsets.get(next_variable).copied().unwrap_or(bytes.len());
                    &bytes[start..end]
                }
            })
            .collect::<Vec<_>>();

        Ok(ContainerDecoder {
            fields: fields.into_iter(),
        })
    }

    /// Decode the next field in declared order
    pub fn decode_next<T: SimpleSerialize>(&mut self) -> Result<T, DecodeError> {
        let field = self.fields.next().ok_or(DecodeError::TruncatedBuffer {
            needed: T::ssz_fixed_len(),
            available: 0,
        })?;
        T::from_ssz_bytes(field)
    }
}

/// Implement [`SimpleSerialize`](crate::ssz::SimpleSerialize) for a record
///
/// Fields are listed in encoding order with their types. Fields named in
/// the optional `skip` list are not encoded and come back as `Default`.
///
/// ```ignore
/// ssz_container!(Checkpoint { epoch: u64, root: Root });
/// ```
#[macro_export]
macro_rules! ssz_container {
    (
        $name:ident {
            $($field:ident : $ty:ty),+ $(,)?
        }
        $(skip { $($skip:ident),* $(,)? })?
    ) => {
        impl $crate::ssz::SimpleSerialize for $name {
            const KIND: $crate::ssz::Kind = $crate::ssz::Kind::container(&[
                $(<$ty as $crate::ssz::SimpleSerialize>::KIND),+
            ]);

            fn ssz_len(&self) -> usize {
                0 $(+ $crate::ssz::field_len(&self.$field))+
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let fixed_part_len =
                    0 $(+ <$ty as $crate::ssz::SimpleSerialize>::ssz_fixed_len())+;
                let mut encoder = $crate::ssz::ContainerEncoder::new(buf, fixed_part_len);
                $(encoder.append::<$ty>(&self.$field);)+
                encoder.finish();
            }

            fn from_ssz_bytes(
                bytes: &[u8],
            ) -> ::std::result::Result<Self, $crate::error::DecodeError> {
                let layout = [
                    $(<$ty as $crate::ssz::SimpleSerialize>::KIND.fixed_size()),+
                ];
                let mut decoder = $crate::ssz::ContainerDecoder::new(bytes, &layout)?;
                Ok($name {
                    $($field: decoder.decode_next::<$ty>()?,)+
                    $($($skip: ::std::default::Default::default(),)*)?
                })
            }

            fn hash_tree_root_with(
                &self,
                hasher: &$crate::ssz::TreeHasher<'_>,
            ) -> $crate::Result<$crate::model::Root> {
                <Self as $crate::ssz::SimpleSerialize>::shape()?;
                let roots = [
                    $(<$ty as $crate::ssz::SimpleSerialize>::hash_tree_root_with(&self.$field, hasher)?),+
                ];
                hasher.merkleize(&roots, roots.len())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::model::Root;
    use crate::ssz::{List, Shape, SimpleSerialize};

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct Pair {
        a: u64,
        b: Root,
    }

    crate::ssz_container!(Pair { a: u64, b: Root });

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct Mixed {
        head: u16,
        first: List<u8, 8>,
        middle: u32,
        second: List<u64, 4>,
        local: u8,
    }

    crate::ssz_container!(
        Mixed {
            head: u16,
            first: List<u8, 8>,
            middle: u32,
            second: List<u64, 4>,
        }
        skip { local }
    );

    fn mixed() -> Mixed {
        Mixed {
            head: 1,
            first: List::new(vec![9, 8]).unwrap(),
            middle: 2,
            second: List::new(vec![5]).unwrap(),
            local: 7,
        }
    }

    #[test]
    fn test_fixed_container() {
        let pair = Pair {
            a: 3,
            b: Root::from_bytes([1; 32]),
        };
        assert_eq!(Pair::shape(), Ok(Shape::Struct));
        assert_eq!(Pair::KIND.fixed_size(), Some(40));
        let bytes = pair.as_ssz_bytes();
        assert_eq!(bytes.len(), 40);
        assert_eq!(Pair::from_ssz_bytes(&bytes).unwrap(), pair);
        assert!(matches!(
            Pair::from_ssz_bytes(&bytes[..39]),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn test_variable_layout() {
        let value = mixed();
        let bytes = value.as_ssz_bytes();
        // fixed region: u16 + offset + u32 + offset = 14
        assert_eq!(&bytes[2..6], &14u32.to_le_bytes());
        assert_eq!(&bytes[10..14], &16u32.to_le_bytes());
        assert_eq!(&bytes[14..16], &[9, 8]);
        assert_eq!(bytes.len(), value.ssz_len());

        let decoded = Mixed::from_ssz_bytes(&bytes).unwrap();
        assert_eq!(decoded.local, 0);
        assert_eq!(decoded.first, value.first);
        assert_eq!(decoded.second, value.second);
    }

    #[test]
    fn test_first_offset_must_close_fixed_region() {
        let mut bytes = mixed().as_ssz_bytes();
        bytes[2..6].copy_from_slice(&13u32.to_le_bytes());
        assert!(matches!(
            Mixed::from_ssz_bytes(&bytes),
            Err(DecodeError::OffsetOutOfRange { offset: 13, .. })
        ));
    }

    #[test]
    fn test_decreasing_offsets() {
        let mut bytes = mixed().as_ssz_bytes();
        bytes[10..14].copy_from_slice(&12u32.to_le_bytes());
        assert_eq!(
            Mixed::from_ssz_bytes(&bytes),
            Err(DecodeError::InvalidOffsetOrder {
                previous: 14,
                offset: 12
            })
        );
    }

    #[test]
    fn test_root_ignores_skipped_fields() {
        let mut other = mixed();
        other.local = 200;
        assert_eq!(
            mixed().hash_tree_root().unwrap(),
            other.hash_tree_root().unwrap()
        );
    }
}
