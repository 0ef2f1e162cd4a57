//! Driver loop executing one frame

use crate::config::InterpreterConfig;
use crate::context::Environment;
use crate::contract::CallFrame;
use crate::error::{EvmError, EvmResult};
use crate::host::Orchestrator;
use crate::opcode::OpCode;
use crate::run::RunState;
use crate::table::JumpTable;
use sevm_crypto::Keccak;
use sevm_state::{StateReader, StateView};

/// What the driver does after a handler returns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Advance to the next byte
    Continue,
    /// Continue at this program counter
    Jump(usize),
    /// Stop the frame
    Halt,
}

/// Executes frames against one run's state.
///
/// Owns the hashing scratch used by `SHA3`, so an instance must not be shared
/// between concurrently executing runs.
pub struct Interpreter<'a> {
    pub(crate) env: &'a Environment,
    pub(crate) state: &'a dyn StateReader,
    pub(crate) host: &'a mut dyn Orchestrator,
    pub(crate) run: &'a mut RunState,
    pub(crate) config: InterpreterConfig,
    pub(crate) hasher: Keccak,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with the default configuration
    pub fn new(
        env: &'a Environment,
        state: &'a dyn StateReader,
        host: &'a mut dyn Orchestrator,
        run: &'a mut RunState,
    ) -> Self {
        Self {
            env,
            state,
            host,
            run,
            config: InterpreterConfig::default(),
            hasher: Keccak::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Run state being accumulated
    pub fn run_state(&self) -> &RunState {
        &*self.run
    }

    /// Overlay-then-committed view of account state
    pub(crate) fn view(&self) -> StateView<'_> {
        StateView::new(&self.run.mstate, self.state)
    }

    /// Execute `frame` until it halts, runs off the end of its code, or the
    /// run aborts. Returns the frame's output.
    pub fn run(&mut self, frame: &mut CallFrame) -> EvmResult<Vec<u8>> {
        let table = JumpTable::shared();
        let mut pc = 0usize;
        let mut steps = 0u64;

        while pc < frame.contract.code.len() {
            if steps >= self.config.max_steps {
                return Err(EvmError::StepLimitExceeded(steps));
            }
            steps += 1;

            let op = OpCode::new(frame.contract.code[pc]);
            tracing::trace!(pc, op = %op, depth = frame.stack.len(), "step");

            let control = table.execute(op, &mut pc, self, frame)?;

            if self.run.outcome.abort {
                tracing::warn!(
                    pc,
                    op = %op,
                    level = self.run.level,
                    address = %frame.contract.address,
                    "speculative run aborted"
                );
                break;
            }

            match control {
                Control::Continue => pc += 1,
                Control::Jump(dest) => pc = dest,
                Control::Halt => break,
            }
        }

        Ok(std::mem::take(&mut frame.output))
    }
}
