//! Shared fixtures for the interpreter integration tests

#![allow(dead_code)]

use sevm_evm::{
    CallFrame, Contract, Environment, EvmResult, Interpreter, InterpreterConfig, OpCode,
    Orchestrator, RunState,
};
use sevm_primitives::{Address, Word};
use sevm_state::InMemoryState;

pub const CONTRACT: Address = Address::from_bytes([0xc0; 20]);
pub const CALLER: Address = Address::from_bytes([0xca; 20]);

pub fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 20])
}

pub fn w(n: u64) -> Word {
    Word::from(n)
}

/// One orchestrator invocation as seen by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: &'static str,
    pub level: usize,
    pub to: Option<Address>,
    pub input: Vec<u8>,
    pub value: Word,
    pub salt: Option<Word>,
}

/// Orchestrator that records what it was asked and replays canned results
#[derive(Default)]
pub struct Scripted {
    pub payloads: Vec<Vec<u8>>,
    pub created: Option<Address>,
    pub dispatches: Vec<Dispatch>,
}

impl Scripted {
    pub fn returning(payloads: Vec<Vec<u8>>) -> Self {
        Self {
            payloads,
            ..Default::default()
        }
    }

    pub fn creating(address: Address) -> Self {
        Self {
            created: Some(address),
            ..Default::default()
        }
    }

    fn record_call(
        &mut self,
        run: &mut RunState,
        kind: &'static str,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()> {
        self.dispatches.push(Dispatch {
            kind,
            level: run.level,
            to: Some(to),
            input: input.to_vec(),
            value,
            salt: None,
        });
        for payload in &self.payloads {
            run.return_data.add(run.level + 1, payload.clone());
        }
        Ok(())
    }

    fn record_create(
        &mut self,
        run: &mut RunState,
        kind: &'static str,
        input: Vec<u8>,
        value: Word,
        salt: Option<Word>,
    ) -> EvmResult<()> {
        self.dispatches.push(Dispatch {
            kind,
            level: run.level,
            to: None,
            input,
            value,
            salt,
        });
        if let Some(address) = self.created {
            run.create_addr.set(run.level + 1, address);
        }
        Ok(())
    }
}

impl Orchestrator for Scripted {
    fn call(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()> {
        self.record_call(run, "call", to, input, value)
    }

    fn call_code(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        to: Address,
        input: &[u8],
        value: Word,
    ) -> EvmResult<()> {
        self.record_call(run, "call_code", to, input, value)
    }

    fn delegate_call(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()> {
        self.record_call(run, "delegate_call", to, input, Word::zero())
    }

    fn static_call(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        to: Address,
        input: &[u8],
    ) -> EvmResult<()> {
        self.record_call(run, "static_call", to, input, Word::zero())
    }

    fn create(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        init_code: Vec<u8>,
        value: Word,
    ) -> EvmResult<()> {
        self.record_create(run, "create", init_code, value, None)
    }

    fn create2(
        &mut self,
        run: &mut RunState,
        _caller: &Contract,
        init_code: Vec<u8>,
        endowment: Word,
        salt: Word,
    ) -> EvmResult<()> {
        self.record_create(run, "create2", init_code, endowment, Some(salt))
    }
}

/// Interpreter inputs owned in one place so a test can inspect them afterwards
pub struct Harness {
    pub env: Environment,
    pub state: InMemoryState,
    pub host: Scripted,
    pub run: RunState,
    pub config: InterpreterConfig,
    pub input: Vec<u8>,
    pub value: Word,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            state: InMemoryState::new(),
            host: Scripted::default(),
            run: RunState::new(),
            config: InterpreterConfig::default(),
            input: Vec::new(),
            value: Word::zero(),
        }
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(host: Scripted) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Execute `code` as `CONTRACT` called by `CALLER`
    pub fn exec(&mut self, code: &[u8]) -> (EvmResult<Vec<u8>>, CallFrame) {
        let contract = Contract::new(
            code.to_vec(),
            CONTRACT,
            CALLER,
            self.value,
            self.input.clone(),
        );
        let mut frame = CallFrame::new(contract, self.config.max_memory);
        let result = Interpreter::new(&self.env, &self.state, &mut self.host, &mut self.run)
            .with_config(self.config)
            .run(&mut frame);
        (result, frame)
    }

    /// Execute `code` and return the stack bottom to top, panicking on error
    pub fn stack_after(&mut self, code: &[u8]) -> Vec<Word> {
        let (result, frame) = self.exec(code);
        result.expect("execution failed");
        frame.stack.as_slice().to_vec()
    }
}

/// Decode a hex bytecode fixture
pub fn code(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str.replace(' ', "")).expect("bad fixture")
}

/// Push the CALL-family operands (gas on top) followed by `op`.
pub fn call_with(op: OpCode, to: u8, value: Option<u8>, input: (u8, u8), out: (u8, u8)) -> Vec<u8> {
    let mut bytecode = vec![0x60, out.1, 0x60, out.0, 0x60, input.1, 0x60, input.0];
    if let Some(value) = value {
        bytecode.extend([0x60, value]);
    }
    bytecode.push(0x73);
    bytecode.extend([to; 20]);
    bytecode.push(OpCode::GAS.byte());
    bytecode.push(op.byte());
    bytecode
}
