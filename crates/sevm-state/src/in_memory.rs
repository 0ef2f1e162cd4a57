//! In-memory committed state

use crate::traits::StateReader;
use sevm_primitives::{Address, Word, H256};
use std::collections::HashMap;

/// Committed account data
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    /// Account nonce
    pub nonce: u64,
    /// Account balance
    pub balance: Word,
    /// Contract code
    pub code: Vec<u8>,
    /// Contract storage
    pub storage: HashMap<H256, Word>,
}

impl Account {
    /// Account holding only a balance
    pub fn with_balance(balance: Word) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Account holding only code
    pub fn with_code(code: Vec<u8>) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }
}

/// Committed state backed by a hash map.
///
/// Serves hosts and tests that need a concrete [`StateReader`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryState {
    accounts: HashMap<Address, Account>,
}

impl InMemoryState {
    /// Create empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account
    pub fn insert_account(&mut self, address: Address, account: Account) {
        self.accounts.insert(address, account);
    }

    /// Builder form of [`InMemoryState::insert_account`]
    pub fn with_account(mut self, address: Address, account: Account) -> Self {
        self.insert_account(address, account);
        self
    }

    /// Set an account balance, creating the account if needed
    pub fn set_balance(&mut self, address: Address, balance: Word) {
        self.accounts.entry(address).or_default().balance = balance;
    }

    /// Set an account nonce, creating the account if needed
    pub fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.accounts.entry(address).or_default().nonce = nonce;
    }

    /// Set contract code, creating the account if needed
    pub fn set_code(&mut self, address: Address, code: Vec<u8>) {
        self.accounts.entry(address).or_default().code = code;
    }

    /// Set a storage slot, creating the account if needed
    pub fn set_storage(&mut self, address: Address, slot: H256, value: Word) {
        self.accounts
            .entry(address)
            .or_default()
            .storage
            .insert(slot, value);
    }

    /// Look up an account
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are present
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl StateReader for InMemoryState {
    fn get_balance(&self, address: &Address) -> Word {
        self.accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    fn get_nonce(&self, address: &Address) -> u64 {
        self.accounts.get(address).map(|a| a.nonce).unwrap_or(0)
    }

    fn get_code(&self, address: &Address) -> Vec<u8> {
        self.accounts
            .get(address)
            .map(|a| a.code.clone())
            .unwrap_or_default()
    }

    fn get_code_size(&self, address: &Address) -> usize {
        self.accounts.get(address).map(|a| a.code.len()).unwrap_or(0)
    }

    fn get_state(&self, address: &Address, slot: &H256) -> Word {
        self.accounts
            .get(address)
            .and_then(|a| a.storage.get(slot).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sevm_crypto::{keccak256, EMPTY_KECCAK};

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    #[test]
    fn test_missing_account_reads_empty() {
        let state = InMemoryState::new();
        assert!(state.get_balance(&addr(1)).is_zero());
        assert_eq!(state.get_nonce(&addr(1)), 0);
        assert!(state.get_code(&addr(1)).is_empty());
        assert!(state.get_state(&addr(1), &H256::ZERO).is_zero());
        assert!(StateReader::is_empty(&state, &addr(1)));
        assert_eq!(state.get_code_hash(&addr(1)), EMPTY_KECCAK);
    }

    #[test]
    fn test_account_fields() {
        let mut state = InMemoryState::new();
        state.set_balance(addr(1), Word::from(100u64));
        state.set_nonce(addr(1), 3);
        state.set_code(addr(1), vec![0x60, 0x00]);
        state.set_storage(addr(1), H256::from_bytes([9; 32]), Word::from(7u64));

        assert_eq!(state.get_balance(&addr(1)), Word::from(100u64));
        assert_eq!(state.get_nonce(&addr(1)), 3);
        assert_eq!(state.get_code_size(&addr(1)), 2);
        assert_eq!(state.get_code_hash(&addr(1)), keccak256(&[0x60, 0x00]));
        assert_eq!(
            state.get_state(&addr(1), &H256::from_bytes([9; 32])),
            Word::from(7u64)
        );
        assert!(!StateReader::is_empty(&state, &addr(1)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_balance_alone_makes_account_non_empty() {
        let state = InMemoryState::new().with_account(addr(2), Account::with_balance(Word::one()));
        assert!(!StateReader::is_empty(&state, &addr(2)));
    }
}
