//! # sevm-primitives
//!
//! Primitive types shared by the speculative EVM crates.
//!
//! The stack element type is [`Word`], a 256-bit unsigned integer with
//! two's-complement interpretation for signed operations.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;
mod word;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};
pub use word::{
    address_from_word, word_from_address, word_from_h256, word_from_slice, word_to_bytes,
    word_to_h256, word_to_u64_saturated, word_to_usize, Word, WORD_BYTES,
};

/// Block number type
pub type BlockNumber = u64;

/// Call nesting level
pub type Level = usize;
