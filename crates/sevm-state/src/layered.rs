//! Overlay-then-committed resolution

use crate::key::{BalanceKey, SlotKey};
use crate::overlay::MockState;
use crate::traits::StateReader;
use sevm_primitives::{Address, Word, H256};

/// Two-tier lookup: consult the overlay, fall back to committed state
pub trait LayeredLookup<K> {
    /// Resolved value type
    type Value;

    /// Overlay entry, `None` when the overlay has nothing for `key`
    fn try_overlay(&self, key: &K) -> Option<Self::Value>;

    /// Committed value for `key`
    fn fallback(&self, key: &K) -> Self::Value;

    /// Overlay entry if present, committed value otherwise
    fn lookup(&self, key: &K) -> Self::Value {
        self.try_overlay(key).unwrap_or_else(|| self.fallback(key))
    }
}

/// Read view over one run's overlay and the committed state
#[derive(Clone, Copy)]
pub struct StateView<'a> {
    overlay: &'a MockState,
    committed: &'a dyn StateReader,
}

impl<'a> StateView<'a> {
    /// Layer `overlay` over `committed`
    pub fn new(overlay: &'a MockState, committed: &'a dyn StateReader) -> Self {
        Self { overlay, committed }
    }

    /// Resolved balance
    pub fn balance(&self, address: Address) -> Word {
        self.lookup(&BalanceKey(address))
    }

    /// Resolved storage value
    pub fn storage(&self, address: Address, slot: H256) -> Word {
        self.lookup(&SlotKey::new(address, slot))
    }

    /// Committed state underneath the overlay
    pub fn committed(&self) -> &'a dyn StateReader {
        self.committed
    }
}

impl LayeredLookup<BalanceKey> for StateView<'_> {
    type Value = Word;

    fn try_overlay(&self, key: &BalanceKey) -> Option<Word> {
        self.overlay.get_balance(&key.0)
    }

    fn fallback(&self, key: &BalanceKey) -> Word {
        self.committed.get_balance(&key.0)
    }
}

impl LayeredLookup<SlotKey> for StateView<'_> {
    type Value = Word;

    fn try_overlay(&self, key: &SlotKey) -> Option<Word> {
        self.overlay.get_state(&key.address, &key.slot)
    }

    fn fallback(&self, key: &SlotKey) -> Word {
        self.committed.get_state(&key.address, &key.slot)
    }
}
