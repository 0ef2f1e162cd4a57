//! Contract frame and per-frame execution state

use crate::memory::Memory;
use crate::opcode::OpCode;
use crate::stack::Stack;
use sevm_primitives::{word_to_usize, Address, Word};
use std::collections::HashSet;

/// Code and call parameters of one frame, fixed for its whole execution
#[derive(Clone, Debug)]
pub struct Contract {
    /// Bytecode being executed
    pub code: Vec<u8>,
    /// Address whose storage and balance the frame acts on
    pub address: Address,
    /// Immediate caller
    pub caller: Address,
    /// Value sent with the call
    pub value: Word,
    /// Call data
    pub input: Vec<u8>,
    jump_dests: HashSet<usize>,
}

impl Contract {
    /// Create a contract frame and analyze its jump destinations
    pub fn new(
        code: Vec<u8>,
        address: Address,
        caller: Address,
        value: Word,
        input: Vec<u8>,
    ) -> Self {
        let jump_dests = analyze_jump_dests(&code);
        Self {
            code,
            address,
            caller,
            value,
            input,
            jump_dests,
        }
    }

    /// Program counter for `dest` if it names a `JUMPDEST` outside push data
    pub fn jump_target(&self, dest: &Word) -> Option<usize> {
        word_to_usize(dest).filter(|pc| self.jump_dests.contains(pc))
    }

    /// Whether a jump to `dest` may be honored
    pub fn is_jumpable(&self, dest: &Word) -> bool {
        self.jump_target(dest).is_some()
    }
}

/// Collect `JUMPDEST` offsets, skipping push immediates
fn analyze_jump_dests(code: &[u8]) -> HashSet<usize> {
    let mut dests = HashSet::new();
    let mut i = 0;

    while i < code.len() {
        let op = OpCode::new(code[i]);
        if op == OpCode::JUMPDEST {
            dests.insert(i);
        }
        i += op.push_size() + 1;
    }

    dests
}

/// Stack, memory and output of a running frame
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Contract being executed
    pub contract: Contract,
    /// Operand stack
    pub stack: Stack,
    /// Frame memory
    pub memory: Memory,
    /// Bytes produced by `RETURN`/`REVERT`
    pub output: Vec<u8>,
}

impl CallFrame {
    /// Fresh frame with memory capped at `max_memory`
    pub fn new(contract: Contract, max_memory: usize) -> Self {
        Self {
            contract,
            stack: Stack::new(),
            memory: Memory::new(max_memory),
            output: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(code: Vec<u8>) -> Contract {
        Contract::new(code, Address::ZERO, Address::ZERO, Word::zero(), Vec::new())
    }

    #[test]
    fn test_jumpdest_at_zero() {
        let c = contract(vec![0x5b, 0x00]);
        assert!(c.is_jumpable(&Word::zero()));
        assert_eq!(c.jump_target(&Word::zero()), Some(0));
        assert!(!c.is_jumpable(&Word::one()));
    }

    #[test]
    fn test_jumpdest_inside_push_data_rejected() {
        // PUSH2 0x5b5b JUMPDEST
        let c = contract(vec![0x61, 0x5b, 0x5b, 0x5b]);
        assert!(!c.is_jumpable(&Word::from(1u8)));
        assert!(!c.is_jumpable(&Word::from(2u8)));
        assert!(c.is_jumpable(&Word::from(3u8)));
    }

    #[test]
    fn test_huge_destination_rejected() {
        let c = contract(vec![0x5b]);
        assert!(!c.is_jumpable(&Word::MAX));
    }
}
