//! 256-bit stack word and its byte/address conversions

use crate::{Address, H256};

/// 256-bit unsigned integer, the EVM stack element
pub type Word = primitive_types::U256;

/// Size of a word in bytes
pub const WORD_BYTES: usize = 32;

/// Big-endian 32-byte representation of a word
pub fn word_to_bytes(word: &Word) -> [u8; 32] {
    let mut out = [0u8; 32];
    word.to_big_endian(&mut out);
    out
}

/// Interpret big-endian bytes as a word.
///
/// Shorter inputs are left-padded with zeros; longer inputs keep only their
/// trailing 32 bytes.
pub fn word_from_slice(bytes: &[u8]) -> Word {
    let start = bytes.len().saturating_sub(WORD_BYTES);
    Word::from_big_endian(&bytes[start..])
}

/// Address as a word (right-aligned)
pub fn word_from_address(address: &Address) -> Word {
    Word::from_big_endian(address.as_bytes())
}

/// Low 20 bytes of a word as an address
pub fn address_from_word(word: &Word) -> Address {
    let bytes = word_to_bytes(word);
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes[12..]);
    Address::from_bytes(out)
}

/// Word as a 32-byte hash / storage key
pub fn word_to_h256(word: &Word) -> H256 {
    H256::from_bytes(word_to_bytes(word))
}

/// Hash / storage value as a word
pub fn word_from_h256(hash: &H256) -> Word {
    Word::from_big_endian(hash.as_bytes())
}

/// Word as u64, saturating at `u64::MAX` when it does not fit
pub fn word_to_u64_saturated(word: &Word) -> u64 {
    if word.bits() > 64 {
        u64::MAX
    } else {
        word.low_u64()
    }
}

/// Word as usize, or `None` when it does not fit
pub fn word_to_usize(word: &Word) -> Option<usize> {
    if word.bits() > 64 {
        return None;
    }
    usize::try_from(word.low_u64()).ok()
}
