//! State owned by one speculative run

use sevm_primitives::{Address, Level};
use sevm_state::{MockState, RwSet};
use std::collections::HashMap;

/// Flags describing how a speculative run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// The run cannot be resolved and must be discarded
    pub abort: bool,
    /// Success of the run
    pub result: bool,
    /// A frame self-destructed
    pub suicide: bool,
}

impl ExecutionOutcome {
    /// Mark the run unresolvable
    pub fn abort(&mut self) {
        self.abort = true;
        self.result = false;
    }
}

impl Default for ExecutionOutcome {
    fn default() -> Self {
        Self {
            abort: false,
            result: true,
            suicide: false,
        }
    }
}

/// Distinct return payloads recorded per call level
#[derive(Clone, Debug, Default)]
pub struct ReturnTable {
    levels: HashMap<Level, Vec<Vec<u8>>>,
}

impl ReturnTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `payload` at `level`; duplicates of a recorded payload are ignored.
    pub fn add(&mut self, level: Level, payload: Vec<u8>) {
        let payloads = self.levels.entry(level).or_default();
        if !payloads.contains(&payload) {
            payloads.push(payload);
        }
    }

    /// Payloads at `level` in recording order
    pub fn get(&self, level: Level) -> &[Vec<u8>] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Forget everything recorded at `level`
    pub fn clear_level(&mut self, level: Level) {
        self.levels.remove(&level);
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

/// Created contract address per call level
#[derive(Clone, Debug, Default)]
pub struct CreateTable {
    levels: HashMap<Level, Address>,
}

impl CreateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the address created at `level`
    pub fn set(&mut self, level: Level, address: Address) {
        self.levels.insert(level, address);
    }

    /// Address created at `level`
    pub fn get(&self, level: Level) -> Option<Address> {
        self.levels.get(&level).copied()
    }

    /// Forget the entry at `level`
    pub fn clear_level(&mut self, level: Level) {
        self.levels.remove(&level);
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

/// Overlay, access record, call-level tables and flags of one run.
///
/// One instance per run; it is never shared between concurrent runs.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    /// Uncommitted balance and storage writes
    pub mstate: MockState,
    /// Accounts read or written
    pub rw_set: RwSet,
    /// Return payloads by level
    pub return_data: ReturnTable,
    /// Created addresses by level
    pub create_addr: CreateTable,
    /// Nesting level of the executing frame
    pub level: Level,
    /// Run flags
    pub outcome: ExecutionOutcome,
}

impl RunState {
    /// Fresh state for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new run
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the tables a sub-call at the next level will fill.
    pub fn prepare_sub_call(&mut self) {
        let next = self.level + 1;
        self.return_data.clear_level(next);
        self.create_addr.clear_level(next);
    }
}
