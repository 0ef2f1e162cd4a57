//! # sevm-crypto
//!
//! Keccak-256 hashing (the legacy, pre-NIST padding used by the EVM).
//!
//! - [`keccak256`] for one-shot digests
//! - [`Keccak`] for a reusable hashing state owned by one interpreter

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{keccak256, Keccak, EMPTY_KECCAK};
