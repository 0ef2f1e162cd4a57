//! Reference orchestrator running nested frames on the same core

use crate::config::InterpreterConfig;
use crate::context::Environment;
use crate::contract::{CallFrame, Contract};
use crate::error::EvmResult;
use crate::host::Orchestrator;
use crate::interpreter::Interpreter;
use crate::run::RunState;
use rlp::RlpStream;
use sevm_crypto::keccak256;
use sevm_primitives::{word_to_bytes, Address, Word};
use sevm_state::StateReader;
use std::collections::HashMap;

/// Executes sub-calls and creations synchronously as nested frames.
///
/// Each nested frame runs one level below its caller and records its
/// `RETURN`/`REVERT` payload there. Value transfers are not applied. A
/// nested frame that fails with a non-fatal error records nothing: a call
/// then aborts its caller, and a creation pushes zero instead of the new
/// address. Past `max_call_depth` nothing is executed at all.
pub struct Executor<'a> {
    env: &'a Environment,
    state: &'a dyn StateReader,
    config: InterpreterConfig,
    nonces: HashMap<Address, u64>,
}

impl<'a> Executor<'a> {
    /// Create an executor with the default configuration
    pub fn new(env: &'a Environment, state: &'a dyn StateReader) -> Self {
        Self {
            env,
            state,
            config: InterpreterConfig::default(),
            nonces: HashMap::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Run `contract` as a frame at the current `run.level`.
    pub fn execute(&mut self, run: &mut RunState, contract: Contract) -> EvmResult<Vec<u8>> {
        let mut frame = CallFrame::new(contract, self.config.max_memory);
        self.execute_frame(run, &mut frame)
    }

    /// Like [`execute`](Self::execute), leaving the finished frame with the caller.
    pub fn execute_frame(&mut self, run: &mut RunState, frame: &mut CallFrame) -> EvmResult<Vec<u8>> {
        let env = self.env;
        let state = self.state;
        let config = self.config;
        Interpreter::new(env, state, self, run)
            .with_config(config)
            .run(frame)
    }

    /// Run `contract` one level down. Returns true only when the frame ran to
    /// completion; false when the depth cap prevented execution or the frame
    /// failed with a non-fatal error.
    fn nested(&mut self, run: &mut RunState, contract: Contract) -> EvmResult<bool> {
        if run.level >= self.config.max_call_depth {
            tracing::debug!(level = run.level, "call depth limit reached");
            return Ok(false);
        }

        let address = contract.address;
        run.level += 1;
        let result = self.execute(run, contract);
        run.level -= 1;

        match result {
            Ok(_) => Ok(true),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::warn!(%address, level = run.level + 1, error = %err, "nested frame failed");
                Ok(false)
            }
        }
    }

    fn next_nonce(&mut self, sender: Address) -> u64 {
        let state = self.state;
        let nonce = self
            .nonces
            .entry(sender)
            .or_insert_with(|| state.get_nonce(&sender));
        let current = *nonce;
        *nonce += 1;
        current
    }

    fn code_of(&self, address: &Address) -> Vec<u8> {
        self.state.get_code(address)
    }
}

impl Orchestrator for Executor<'_> {
    fn call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()> {
        let contract = Contract::new(self.code_of(&to), to, caller.address, value, input.to_vec());
        self.nested(run, contract).map(|_| ())
    }

    fn call_code(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()> {
        let contract = Contract::new(
            self.code_of(&to),
            caller.address,
            caller.address,
            value,
            input.to_vec(),
        );
        self.nested(run, contract).map(|_| ())
    }

    fn delegate_call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()> {
        let contract = Contract::new(
            self.code_of(&to),
            caller.address,
            caller.caller,
            caller.value,
            input.to_vec(),
        );
        self.nested(run, contract).map(|_| ())
    }

    fn static_call(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()> {
        let contract = Contract::new(
            self.code_of(&to),
            to,
            caller.address,
            Word::zero(),
            input.to_vec(),
        );
        self.nested(run, contract).map(|_| ())
    }

    fn create(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        init_code: Vec<u8>,
        value: Word,
    ) -> EvmResult<()> {
        let nonce = self.next_nonce(caller.address);
        let address = create_address(&caller.address, nonce);
        let contract = Contract::new(init_code, address, caller.address, value, Vec::new());
        if self.nested(run, contract)? {
            run.create_addr.set(run.level + 1, address);
        }
        Ok(())
    }

    fn create2(
        &mut self,
        run: &mut RunState,
        caller: &Contract,
        init_code: Vec<u8>,
        endowment: Word,
        salt: Word,
    ) -> EvmResult<()> {
        let address = create2_address(&caller.address, &word_to_bytes(&salt), &init_code);
        let contract = Contract::new(init_code, address, caller.address, endowment, Vec::new());
        if self.nested(run, contract)? {
            run.create_addr.set(run.level + 1, address);
        }
        Ok(())
    }
}

/// `CREATE` address: keccak256(rlp([sender, nonce]))[12..]
pub fn create_address(sender: &Address, nonce: u64) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(&sender.as_bytes().to_vec());
    if nonce == 0 {
        stream.append_empty_data();
    } else {
        stream.append(&nonce);
    }
    address_from_hash(&stream.out())
}

/// `CREATE2` address: keccak256(0xff ++ sender ++ salt ++ keccak256(init_code))[12..]
pub fn create2_address(sender: &Address, salt: &[u8; 32], init_code: &[u8]) -> Address {
    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(sender.as_bytes());
    preimage.extend_from_slice(salt);
    preimage.extend_from_slice(keccak256(init_code).as_bytes());
    address_from_hash(&preimage)
}

fn address_from_hash(preimage: &[u8]) -> Address {
    let hash = keccak256(preimage);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}
