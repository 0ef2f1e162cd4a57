//! Read/write set tracking for one speculative run
//!
//! Accesses are recorded at account granularity: a storage read or write is
//! attributed to the executing contract's address, not to the slot.

use sevm_primitives::Address;
use std::collections::{HashMap, HashSet};

/// Kind of access observed for an address. `Write` outranks `Read`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessKind {
    /// State was observed
    Read,
    /// State was modified
    Write,
}

/// One recorded access, in program order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Touched account
    pub address: Address,
    /// What happened to it
    pub kind: AccessKind,
}

/// Read/write set of a speculative run.
///
/// Keeps the strongest kind seen per address (for conflict detection) and
/// the chronological access log (for diagnostics and replay).
#[derive(Clone, Debug, Default)]
pub struct RwSet {
    kinds: HashMap<Address, AccessKind>,
    log: Vec<Access>,
}

impl RwSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an access; a write is never downgraded by a later read
    pub fn record(&mut self, address: Address, kind: AccessKind) {
        self.log.push(Access { address, kind });
        let entry = self.kinds.entry(address).or_insert(kind);
        if kind > *entry {
            *entry = kind;
        }
    }

    /// Record a read access
    pub fn record_read(&mut self, address: Address) {
        self.record(address, AccessKind::Read);
    }

    /// Record a write access
    pub fn record_write(&mut self, address: Address) {
        self.record(address, AccessKind::Write);
    }

    /// Strongest access recorded for `address`
    pub fn kind_of(&self, address: &Address) -> Option<AccessKind> {
        self.kinds.get(address).copied()
    }

    /// Addresses whose strongest access is a read
    pub fn reads(&self) -> impl Iterator<Item = &Address> {
        self.kinds
            .iter()
            .filter(|(_, kind)| **kind == AccessKind::Read)
            .map(|(address, _)| address)
    }

    /// Addresses that were written
    pub fn writes(&self) -> impl Iterator<Item = &Address> {
        self.kinds
            .iter()
            .filter(|(_, kind)| **kind == AccessKind::Write)
            .map(|(address, _)| address)
    }

    /// Chronological access log
    pub fn log(&self) -> &[Access] {
        &self.log
    }

    /// `self` reads an address `other` writes (read-after-write)
    pub fn has_raw_dependency(&self, other: &RwSet) -> bool {
        self.reads()
            .any(|a| other.kind_of(a) == Some(AccessKind::Write))
    }

    /// Both sets write the same address
    pub fn has_waw_conflict(&self, other: &RwSet) -> bool {
        self.writes()
            .any(|a| other.kind_of(a) == Some(AccessKind::Write))
    }

    /// `self` writes an address `other` reads (anti-dependency)
    pub fn has_war_conflict(&self, other: &RwSet) -> bool {
        self.writes()
            .any(|a| other.kind_of(a) == Some(AccessKind::Read))
    }

    /// Every conflicting address, grouped by conflict kind
    pub fn conflicts_with(&self, other: &RwSet) -> ConflictSet {
        let mut conflicts = ConflictSet::default();
        for (address, kind) in &self.kinds {
            match (kind, other.kind_of(address)) {
                (AccessKind::Read, Some(AccessKind::Write)) => {
                    conflicts.raw.insert(*address);
                }
                (AccessKind::Write, Some(AccessKind::Write)) => {
                    conflicts.waw.insert(*address);
                }
                (AccessKind::Write, Some(AccessKind::Read)) => {
                    conflicts.war.insert(*address);
                }
                _ => {}
            }
        }
        conflicts
    }

    /// Number of distinct addresses touched
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Merge another set into this one, appending its log
    pub fn merge(&mut self, other: &RwSet) {
        for access in &other.log {
            self.record(access.address, access.kind);
        }
    }

    /// Clear the set
    pub fn clear(&mut self) {
        self.kinds.clear();
        self.log.clear();
    }
}

/// Conflicting addresses between two read/write sets
#[derive(Clone, Debug, Default)]
pub struct ConflictSet {
    /// Read-after-write conflicts
    pub raw: HashSet<Address>,
    /// Write-after-write conflicts
    pub waw: HashSet<Address>,
    /// Write-after-read conflicts
    pub war: HashSet<Address>,
}

impl ConflictSet {
    /// Check if there are any conflicts
    pub fn has_conflicts(&self) -> bool {
        !self.raw.is_empty() || !self.waw.is_empty() || !self.war.is_empty()
    }

    /// Total number of conflicting addresses
    pub fn total_conflicts(&self) -> usize {
        self.raw.len() + self.waw.len() + self.war.len()
    }
}
