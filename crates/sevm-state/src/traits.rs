//! Read access to committed state

use sevm_crypto::{keccak256, EMPTY_KECCAK};
use sevm_primitives::{Address, Word, H256};

/// Read access to committed state.
///
/// A speculative run only ever reads through this trait; its writes land in
/// the overlay. Missing accounts read as empty (zero balance, no code, zero
/// storage).
pub trait StateReader {
    /// Account balance
    fn get_balance(&self, address: &Address) -> Word;

    /// Account nonce
    fn get_nonce(&self, address: &Address) -> u64;

    /// Contract code (empty for externally owned or missing accounts)
    fn get_code(&self, address: &Address) -> Vec<u8>;

    /// Storage value of one slot
    fn get_state(&self, address: &Address, slot: &H256) -> Word;

    /// Code length in bytes
    fn get_code_size(&self, address: &Address) -> usize {
        self.get_code(address).len()
    }

    /// keccak256 of the account code
    fn get_code_hash(&self, address: &Address) -> H256 {
        let code = self.get_code(address);
        if code.is_empty() {
            EMPTY_KECCAK
        } else {
            keccak256(&code)
        }
    }

    /// Empty per EIP-161: no nonce, no balance, no code
    fn is_empty(&self, address: &Address) -> bool {
        self.get_nonce(address) == 0
            && self.get_balance(address).is_zero()
            && self.get_code_size(address) == 0
    }
}
