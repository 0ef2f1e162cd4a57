//! Run configuration and committed-state files

use anyhow::{anyhow, Context, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sevm_evm::{BlockContext, ChainConfig, Environment, InterpreterConfig, TxContext};
use sevm_primitives::{word_to_h256, Address, BlockNumber, Word, H256};
use sevm_state::{Account, InMemoryState};
use std::collections::HashMap;
use std::path::Path;

/// Block fields of a run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSection {
    pub number: BlockNumber,
    pub timestamp: u64,
    pub gas_limit: u64,
    pub coinbase: Address,
    pub hash: H256,
    pub ancestor_hashes: HashMap<BlockNumber, H256>,
    /// Decimal or 0x-prefixed hex
    pub difficulty: String,
}

/// Everything besides committed state that shapes a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub interpreter: InterpreterConfig,
    pub block: BlockSection,
    pub origin: Address,
    /// Decimal or 0x-prefixed hex
    pub gas_price: String,
    pub chain_id: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interpreter: InterpreterConfig::default(),
            block: BlockSection::default(),
            origin: Address::default(),
            gas_price: "0".to_string(),
            chain_id: ChainConfig::default().chain_id,
        }
    }
}

impl RunConfig {
    /// Build the immutable run environment
    pub fn environment(&self) -> Result<Environment> {
        let block = &self.block;
        Ok(Environment {
            block: BlockContext {
                number: block.number,
                timestamp: block.timestamp,
                gas_limit: block.gas_limit,
                coinbase: block.coinbase,
                hash: block.hash,
                ancestor_hashes: block.ancestor_hashes.clone(),
                difficulty: parse_biguint(&block.difficulty).context("invalid difficulty")?,
            },
            tx: TxContext {
                origin: self.origin,
                gas_price: parse_biguint(&self.gas_price).context("invalid gas price")?,
            },
            chain: ChainConfig {
                chain_id: self.chain_id,
            },
        })
    }
}

/// One committed account in a state file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateAccount {
    /// Decimal or 0x-prefixed hex
    pub balance: String,
    pub nonce: u64,
    /// Hex-encoded contract code
    pub code: Option<String>,
    /// Slot to value, both decimal or 0x-prefixed hex
    pub storage: HashMap<String, String>,
}

impl StateAccount {
    fn to_account(&self) -> Result<Account> {
        let balance = if self.balance.is_empty() {
            Word::zero()
        } else {
            parse_word(&self.balance).context("invalid balance")?
        };
        let code = match &self.code {
            Some(code) => decode_hex(code).context("invalid code")?,
            None => Vec::new(),
        };
        let mut storage = HashMap::new();
        for (slot, value) in &self.storage {
            let slot = word_to_h256(&parse_word(slot).context("invalid storage slot")?);
            let value = parse_word(value).context("invalid storage value")?;
            storage.insert(slot, value);
        }
        Ok(Account {
            nonce: self.nonce,
            balance,
            code,
            storage,
        })
    }
}

/// Committed accounts keyed by address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub accounts: HashMap<Address, StateAccount>,
}

impl StateFile {
    /// Build committed state from the file contents
    pub fn into_state(self) -> Result<InMemoryState> {
        let mut state = InMemoryState::new();
        for (address, account) in &self.accounts {
            let account = account
                .to_account()
                .with_context(|| format!("account {address}"))?;
            state.insert_account(*address, account);
        }
        Ok(state)
    }
}

/// Load a run configuration from a JSON file
pub fn load_run_config(path: &Path) -> Result<RunConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Load committed state from a JSON file
pub fn load_state_file(path: &Path) -> Result<InMemoryState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read state {}", path.display()))?;
    let file: StateFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse state {}", path.display()))?;
    file.into_state()
}

/// Parse a word given in decimal or 0x-prefixed hex
pub fn parse_word(s: &str) -> Result<Word> {
    let s = s.trim();
    match s.strip_prefix("0x") {
        Some(hex) => Word::from_str_radix(hex, 16).map_err(|e| anyhow!("{s}: {e:?}")),
        None => Word::from_dec_str(s).map_err(|e| anyhow!("{s}: {e:?}")),
    }
}

/// Parse an arbitrary-precision integer given in decimal or 0x-prefixed hex
pub fn parse_biguint(s: &str) -> Result<BigUint> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(BigUint::default());
    }
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(s.as_bytes(), 10),
    };
    parsed.ok_or_else(|| anyhow!("not a number: {s}"))
}

/// Decode hex with or without a 0x prefix, ignoring surrounding whitespace
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| anyhow!("invalid hex: {e}"))
}
