//! Immutable block, transaction and chain context of a run

use crate::error::{EvmError, EvmResult};
use num_bigint::BigUint;
use num_traits::Zero;
use sevm_primitives::{Address, BlockNumber, Word, H256};
use std::collections::HashMap;

/// Block being executed
#[derive(Clone, Debug, Default)]
pub struct BlockContext {
    /// Current block number
    pub number: BlockNumber,
    /// Block timestamp
    pub timestamp: u64,
    /// Block gas limit
    pub gas_limit: u64,
    /// Block beneficiary
    pub coinbase: Address,
    /// Hash reported for ancestors without an explicit entry
    pub hash: H256,
    /// Known ancestor hashes by number
    pub ancestor_hashes: HashMap<BlockNumber, H256>,
    /// Arbitrary-precision difficulty
    pub difficulty: BigUint,
}

impl BlockContext {
    /// Hash of ancestor `number`, falling back to the block hash.
    pub fn hash_of(&self, number: BlockNumber) -> H256 {
        self.ancestor_hashes
            .get(&number)
            .copied()
            .unwrap_or(self.hash)
    }

    /// Whether `BLOCKHASH` may answer for `number`.
    ///
    /// The window is the 256 blocks below the current one; it starts at 0
    /// while the chain is shorter than 257 blocks.
    pub fn in_hash_window(&self, number: BlockNumber) -> bool {
        let upper = self.number;
        let lower = if upper < 257 { 0 } else { upper - 256 };
        number >= lower && number < upper
    }
}

/// Transaction being executed
#[derive(Clone, Debug, Default)]
pub struct TxContext {
    /// Transaction origin
    pub origin: Address,
    /// Arbitrary-precision gas price
    pub gas_price: BigUint,
}

/// Chain parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    /// EIP-155 chain id
    pub chain_id: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { chain_id: 1 }
    }
}

/// Everything a run can observe that is not account state
#[derive(Clone, Debug, Default)]
pub struct Environment {
    /// Block context
    pub block: BlockContext,
    /// Transaction context
    pub tx: TxContext,
    /// Chain parameters
    pub chain: ChainConfig,
}

/// Narrow an arbitrary-precision chain value into a word.
///
/// These values always fit on a correctly configured host, so overflow is
/// reported as [`EvmError::Fatal`].
pub fn biguint_to_word(value: &BigUint, what: &str) -> EvmResult<Word> {
    if value.is_zero() {
        return Ok(Word::zero());
    }
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(EvmError::Fatal(format!("{what} does not fit in 256 bits")));
    }
    Ok(Word::from_big_endian(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_window_short_chain() {
        let block = BlockContext {
            number: 100,
            ..Default::default()
        };
        assert!(block.in_hash_window(0));
        assert!(block.in_hash_window(99));
        assert!(!block.in_hash_window(100));
    }

    #[test]
    fn test_hash_window_boundaries() {
        let block = BlockContext {
            number: 1000,
            ..Default::default()
        };
        assert!(!block.in_hash_window(743));
        assert!(block.in_hash_window(744));
        assert!(block.in_hash_window(999));
        assert!(!block.in_hash_window(1000));

        let block = BlockContext {
            number: 257,
            ..Default::default()
        };
        assert!(!block.in_hash_window(0));
        assert!(block.in_hash_window(1));
    }

    #[test]
    fn test_hash_of_falls_back() {
        let mut block = BlockContext {
            hash: H256::from_bytes([1u8; 32]),
            ..Default::default()
        };
        block.ancestor_hashes.insert(5, H256::from_bytes([5u8; 32]));
        assert_eq!(block.hash_of(5), H256::from_bytes([5u8; 32]));
        assert_eq!(block.hash_of(6), H256::from_bytes([1u8; 32]));
    }

    #[test]
    fn test_biguint_to_word() {
        assert_eq!(
            biguint_to_word(&BigUint::from(1_000_000_000u64), "gas price").unwrap(),
            Word::from(1_000_000_000u64)
        );
        let max = BigUint::from_bytes_be(&[0xff; 32]);
        assert_eq!(biguint_to_word(&max, "difficulty").unwrap(), Word::MAX);

        let too_big = BigUint::from_bytes_be(&[1u8; 33]);
        let err = biguint_to_word(&too_big, "difficulty").unwrap_err();
        assert!(err.is_fatal());
    }
}
