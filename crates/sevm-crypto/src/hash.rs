//! Keccak-256 hashing

use sevm_primitives::H256;
use sha3::digest::Output;
use sha3::{Digest, Keccak256};

/// keccak256 of the empty byte string
pub const EMPTY_KECCAK: H256 = H256::from_bytes([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c,
    0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b,
    0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Reusable Keccak-256 state.
///
/// Finalizing resets the sponge in place, so one instance serves every
/// digest an interpreter computes. Not meant to be shared between runs.
#[derive(Clone, Default)]
pub struct Keccak {
    hasher: Keccak256,
    buf: [u8; 32],
}

impl Keccak {
    /// Create a fresh hashing state
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `data` and return the digest held in the internal buffer
    pub fn digest(&mut self, data: &[u8]) -> &[u8; 32] {
        Digest::update(&mut self.hasher, data);
        Digest::finalize_into_reset(
            &mut self.hasher,
            Output::<Keccak256>::from_mut_slice(&mut self.buf),
        );
        &self.buf
    }
}

impl std::fmt::Debug for Keccak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keccak").field("last", &hex_prefix(&self.buf)).finish()
    }
}

fn hex_prefix(buf: &[u8; 32]) -> String {
    buf.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
