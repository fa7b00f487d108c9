//! Validator withdrawals carried in the execution payload

use crate::constants::MAX_WITHDRAWALS_PER_PAYLOAD;
use crate::model::ExecutionAddress;
use crate::ssz::List;
use crate::ssz_container;
use serde::{Deserialize, Serialize};

/// A withdrawal credited to an execution layer address
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Monotonic withdrawal index
    pub index: u64,
    pub validator_index: u64,
    pub address: ExecutionAddress,
    /// Amount in gwei
    pub amount: u64,
}

ssz_container!(Withdrawal {
    index: u64,
    validator_index: u64,
    address: ExecutionAddress,
    amount: u64,
});

pub type Withdrawals = List<Withdrawal, MAX_WITHDRAWALS_PER_PAYLOAD>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssz::{Shape, SimpleSerialize};

    fn sample() -> Withdrawal {
        Withdrawal {
            index: 7,
            validator_index: 3,
            address: ExecutionAddress::ZERO,
            amount: 100,
        }
    }

    #[test]
    fn test_fixed_encoding() {
        let bytes = sample().as_ssz_bytes();
        assert_eq!(Withdrawal::KIND.fixed_size(), Some(44));
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[..8], &7u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &3u64.to_le_bytes());
        assert!(bytes[16..36].iter().all(|b| *b == 0));
        assert_eq!(&bytes[36..], &100u64.to_le_bytes());
        assert_eq!(Withdrawal::from_ssz_bytes(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_known_root() {
        let first = sample().hash_tree_root().unwrap();
        assert_eq!(
            first.to_hex(),
            "0x64896c80cd01de6dbcd8e499de6556c09214ec2169298d48b69d2d49eec68a77"
        );
        assert_eq!(sample().hash_tree_root().unwrap(), first);
    }

    #[test]
    fn test_withdrawals_shape() {
        assert_eq!(Withdrawals::shape(), Ok(Shape::BoundedListOfComposites));
        let full = Withdrawals::new(vec![sample(); MAX_WITHDRAWALS_PER_PAYLOAD]);
        assert!(full.is_ok());
        assert!(Withdrawals::new(vec![sample(); MAX_WITHDRAWALS_PER_PAYLOAD + 1]).is_err());
    }
}
