//! # sevm-state
//!
//! State access for one speculative run.
//!
//! - [`StateReader`]: read-only committed state (never written by a run)
//! - [`MockState`]: the speculative overlay holding uncommitted writes
//! - [`StateView`]: overlay-then-committed resolution via [`LayeredLookup`]
//! - [`RwSet`]: per-address access record used for conflict detection

#![warn(missing_docs)]
#![warn(clippy::all)]

mod access;
mod in_memory;
mod key;
mod layered;
mod overlay;
mod traits;

pub use access::{Access, AccessKind, ConflictSet, RwSet};
pub use in_memory::{Account, InMemoryState};
pub use key::{BalanceKey, SlotKey};
pub use layered::{LayeredLookup, StateView};
pub use overlay::MockState;
pub use traits::StateReader;
