//! Speculative overlay ("mock state")

use crate::key::SlotKey;
use crate::traits::StateReader;
use sevm_primitives::{Address, Word, H256};
use std::collections::HashMap;

/// Uncommitted balances and storage written during one speculative run.
///
/// An absent entry is not a zero: it means "fall through to committed
/// state". The overlay is committed or discarded as a whole by the scheduler.
#[derive(Clone, Debug, Default)]
pub struct MockState {
    balances: HashMap<Address, Word>,
    storage: HashMap<SlotKey, Word>,
}

impl MockState {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay balance, if one was written
    pub fn get_balance(&self, address: &Address) -> Option<Word> {
        self.balances.get(address).copied()
    }

    /// Overwrite the overlay balance
    pub fn set_balance(&mut self, address: Address, balance: Word) {
        self.balances.insert(address, balance);
    }

    /// Add to the layered balance of `address`.
    ///
    /// An absent overlay entry starts from the committed balance. Wraps
    /// modulo 2^256.
    pub fn add_balance(&mut self, committed: &dyn StateReader, address: Address, amount: Word) {
        let entry = self
            .balances
            .entry(address)
            .or_insert_with(|| committed.get_balance(&address));
        *entry = entry.overflowing_add(amount).0;
    }

    /// Overlay storage value, if one was written
    pub fn get_state(&self, address: &Address, slot: &H256) -> Option<Word> {
        self.storage.get(&SlotKey::new(*address, *slot)).copied()
    }

    /// Write a storage value into the overlay
    pub fn set_state(&mut self, address: Address, slot: H256, value: Word) {
        tracing::trace!(%address, %slot, %value, "overlay store");
        self.storage.insert(SlotKey::new(address, slot), value);
    }

    /// Iterate over written balances
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Word)> {
        self.balances.iter()
    }

    /// Iterate over written storage slots
    pub fn storage(&self) -> impl Iterator<Item = (&SlotKey, &Word)> {
        self.storage.iter()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.storage.is_empty()
    }

    /// Drop every write
    pub fn clear(&mut self) {
        self.balances.clear();
        self.storage.clear();
    }
}
