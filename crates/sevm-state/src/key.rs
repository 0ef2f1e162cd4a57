//! Lookup keys for layered state resolution

use sevm_primitives::{Address, H256};

/// Key of an account balance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BalanceKey(pub Address);

/// Key of one storage slot of one account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Contract address
    pub address: Address,
    /// Storage slot
    pub slot: H256,
}

impl SlotKey {
    /// Create a new slot key
    pub fn new(address: Address, slot: H256) -> Self {
        Self { address, slot }
    }
}
