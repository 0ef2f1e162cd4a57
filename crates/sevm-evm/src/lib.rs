//! # sevm-evm
//!
//! Opcode core of a speculative EVM used to discover read/write sets for
//! parallel transaction scheduling.
//!
//! - [`Interpreter`]: driver loop over a 256-entry [`JumpTable`]
//! - [`RunState`]: overlay, access set, call-level tables and flags of one run
//! - [`Orchestrator`]: hand-off point for calls and creations; the opcode
//!   resolves whatever the orchestrator recorded one level down
//! - [`Executor`]: reference orchestrator running nested frames in-process
//!
//! Gas is not metered. Committed state is read-only; every write goes to the
//! run's overlay.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arith;
mod config;
mod context;
mod contract;
mod error;
mod executor;
mod host;
mod instructions;
mod interpreter;
mod memory;
mod opcode;
mod run;
mod stack;
mod table;

pub use config::{
    InterpreterConfig, DEFAULT_GAS_STAND_IN, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_MEMORY,
    DEFAULT_MAX_STEPS,
};
pub use context::{biguint_to_word, BlockContext, ChainConfig, Environment, TxContext};
pub use contract::{CallFrame, Contract};
pub use error::{EvmError, EvmResult};
pub use executor::{create2_address, create_address, Executor};
pub use host::Orchestrator;
pub use interpreter::{Control, Interpreter};
pub use memory::Memory;
pub use opcode::OpCode;
pub use run::{CreateTable, ExecutionOutcome, ReturnTable, RunState};
pub use stack::{Stack, MAX_STACK_SIZE};
pub use table::{Handler, Instruction, JumpTable};
