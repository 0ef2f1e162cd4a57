//! Seam between the opcode core and whoever runs nested frames

use crate::contract::Contract;
use crate::error::EvmResult;
use crate::run::RunState;
use sevm_primitives::{Address, Word};

/// Executes sub-calls and creations on behalf of a frame.
///
/// Implementations run (or simulate) the nested frame synchronously and leave
/// their findings in `run`: return payloads at `run.level + 1` for the CALL
/// family, the created address at `run.level + 1` for CREATE and CREATE2.
/// The calling handler resolves the outcome once the method returns.
pub trait Orchestrator {
    /// `CALL`: run `to` in its own context
    fn call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()>;

    /// `CALLCODE`: run `to`'s code in the caller's context
    fn call_code(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()>;

    /// `DELEGATECALL`: like `call_code`, keeping the caller's sender and value
    fn delegate_call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()>;

    /// `STATICCALL`: run `to` without value
    fn static_call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()>;

    /// `CREATE`: deploy `init_code`
    fn create(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        init_code: Vec<u8>,
        value: Word,
    ) -> EvmResult<()>;

    /// `CREATE2`: deploy `init_code` at a salted address
    fn create2(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        init_code: Vec<u8>,
        endowment: Word,
        salt: Word,
    ) -> EvmResult<()>;
}
