//! Opcode dispatch table, built once per process

use crate::contract::CallFrame;
use crate::error::{EvmError, EvmResult};
use crate::instructions::{
    arithmetic, bitwise, block, control, environment, hash, memory, stack, storage, system,
};
use crate::interpreter::{Control, Interpreter};
use crate::opcode::OpCode;
use std::sync::OnceLock;

/// Signature shared by all fixed-width handlers
pub type Handler = fn(&mut usize, &mut Interpreter<'_>, &mut CallFrame) -> EvmResult<Control>;

/// One dispatch table entry.
///
/// Opcode families that differ only by width carry the width instead of a
/// dedicated handler.
#[derive(Clone, Copy)]
pub enum Instruction {
    /// Fixed handler
    Op(Handler),
    /// `PUSHn` with `n` immediate bytes (0 for `PUSH0`)
    Push(usize),
    /// `DUPn`
    Dup(usize),
    /// `SWAPn`
    Swap(usize),
    /// `LOGn` with `n` topics
    Log(usize),
    /// No opcode at this byte
    Undefined,
}

impl std::fmt::Debug for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Op(_) => f.write_str("Op"),
            Instruction::Push(n) => write!(f, "Push({n})"),
            Instruction::Dup(n) => write!(f, "Dup({n})"),
            Instruction::Swap(n) => write!(f, "Swap({n})"),
            Instruction::Log(n) => write!(f, "Log({n})"),
            Instruction::Undefined => f.write_str("Undefined"),
        }
    }
}

/// 256-entry table indexed by opcode byte
pub struct JumpTable {
    entries: [Instruction; 256],
}

impl JumpTable {
    /// Build the table
    pub fn new() -> Self {
        let mut table = Self {
            entries: [Instruction::Undefined; 256],
        };

        table.op(OpCode::STOP, control::stop);
        table.op(OpCode::ADD, arithmetic::add);
        table.op(OpCode::MUL, arithmetic::mul);
        table.op(OpCode::SUB, arithmetic::sub);
        table.op(OpCode::DIV, arithmetic::div);
        table.op(OpCode::SDIV, arithmetic::sdiv);
        table.op(OpCode::MOD, arithmetic::rem);
        table.op(OpCode::SMOD, arithmetic::smod);
        table.op(OpCode::ADDMOD, arithmetic::addmod);
        table.op(OpCode::MULMOD, arithmetic::mulmod);
        table.op(OpCode::EXP, arithmetic::exp);
        table.op(OpCode::SIGNEXTEND, arithmetic::signextend);

        table.op(OpCode::LT, bitwise::lt);
        table.op(OpCode::GT, bitwise::gt);
        table.op(OpCode::SLT, bitwise::slt);
        table.op(OpCode::SGT, bitwise::sgt);
        table.op(OpCode::EQ, bitwise::eq);
        table.op(OpCode::ISZERO, bitwise::iszero);
        table.op(OpCode::AND, bitwise::and);
        table.op(OpCode::OR, bitwise::or);
        table.op(OpCode::XOR, bitwise::xor);
        table.op(OpCode::NOT, bitwise::not);
        table.op(OpCode::BYTE, bitwise::byte);
        table.op(OpCode::SHL, bitwise::shl);
        table.op(OpCode::SHR, bitwise::shr);
        table.op(OpCode::SAR, bitwise::sar);

        table.op(OpCode::SHA3, hash::sha3);

        table.op(OpCode::ADDRESS, environment::address);
        table.op(OpCode::BALANCE, environment::balance);
        table.op(OpCode::ORIGIN, environment::origin);
        table.op(OpCode::CALLER, environment::caller);
        table.op(OpCode::CALLVALUE, environment::callvalue);
        table.op(OpCode::CALLDATALOAD, environment::calldataload);
        table.op(OpCode::CALLDATASIZE, environment::calldatasize);
        table.op(OpCode::CALLDATACOPY, environment::calldatacopy);
        table.op(OpCode::CODESIZE, environment::codesize);
        table.op(OpCode::CODECOPY, environment::codecopy);
        table.op(OpCode::GASPRICE, environment::gasprice);
        table.op(OpCode::EXTCODESIZE, environment::extcodesize);
        table.op(OpCode::EXTCODECOPY, environment::extcodecopy);
        table.op(OpCode::RETURNDATASIZE, environment::returndatasize);
        table.op(OpCode::RETURNDATACOPY, environment::returndatacopy);
        table.op(OpCode::EXTCODEHASH, environment::extcodehash);

        table.op(OpCode::BLOCKHASH, block::blockhash);
        table.op(OpCode::COINBASE, block::coinbase);
        table.op(OpCode::TIMESTAMP, block::timestamp);
        table.op(OpCode::NUMBER, block::number);
        table.op(OpCode::DIFFICULTY, block::difficulty);
        table.op(OpCode::GASLIMIT, block::gaslimit);
        table.op(OpCode::CHAINID, block::chainid);
        table.op(OpCode::SELFBALANCE, environment::selfbalance);

        table.op(OpCode::POP, stack::pop);
        table.op(OpCode::MLOAD, memory::mload);
        table.op(OpCode::MSTORE, memory::mstore);
        table.op(OpCode::MSTORE8, memory::mstore8);
        table.op(OpCode::SLOAD, storage::sload);
        table.op(OpCode::SSTORE, storage::sstore);
        table.op(OpCode::JUMP, control::jump);
        table.op(OpCode::JUMPI, control::jumpi);
        table.op(OpCode::PC, control::pc);
        table.op(OpCode::MSIZE, memory::msize);
        table.op(OpCode::GAS, control::gas);
        table.op(OpCode::JUMPDEST, control::jumpdest);

        table.entries[OpCode::PUSH0.byte() as usize] = Instruction::Push(0);
        for byte in 0..=u8::MAX {
            let op = OpCode::new(byte);
            let family = if op.push_size() > 0 {
                Instruction::Push(op.push_size())
            } else if op.dup_depth() > 0 {
                Instruction::Dup(op.dup_depth())
            } else if op.swap_depth() > 0 {
                Instruction::Swap(op.swap_depth())
            } else if let Some(topics) = op.log_topics() {
                Instruction::Log(topics)
            } else {
                continue;
            };
            table.entries[byte as usize] = family;
        }

        table.op(OpCode::CREATE, system::create);
        table.op(OpCode::CALL, system::call);
        table.op(OpCode::CALLCODE, system::call_code);
        table.op(OpCode::RETURN, system::ret);
        table.op(OpCode::DELEGATECALL, system::delegate_call);
        table.op(OpCode::CREATE2, system::create2);
        table.op(OpCode::STATICCALL, system::static_call);
        table.op(OpCode::REVERT, system::revert);
        table.op(OpCode::INVALID, control::invalid);
        table.op(OpCode::SELFDESTRUCT, system::selfdestruct);

        table
    }

    /// Process-wide table
    pub fn shared() -> &'static JumpTable {
        static TABLE: OnceLock<JumpTable> = OnceLock::new();
        TABLE.get_or_init(JumpTable::new)
    }

    /// Entry for `op`
    pub fn get(&self, op: OpCode) -> Instruction {
        self.entries[op.byte() as usize]
    }

    /// Run the handler for `op`
    pub fn execute(
        &self,
        op: OpCode,
        pc: &mut usize,
        interp: &mut Interpreter<'_>,
        frame: &mut CallFrame,
    ) -> EvmResult<Control> {
        match self.get(op) {
            Instruction::Op(handler) => handler(pc, interp, frame),
            Instruction::Push(n) => stack::push(n, pc, frame),
            Instruction::Dup(n) => stack::dup(n, frame),
            Instruction::Swap(n) => stack::swap(n, frame),
            Instruction::Log(n) => stack::log(n, frame),
            Instruction::Undefined => Err(EvmError::InvalidOpcode(op.byte())),
        }
    }

    fn op(&mut self, op: OpCode, handler: Handler) {
        self.entries[op.byte() as usize] = Instruction::Op(handler);
    }
}

impl Default for JumpTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_defined_opcode_has_an_entry() {
        let table = JumpTable::new();
        for byte in 0..=255u8 {
            let op = OpCode::new(byte);
            let defined = !matches!(table.get(op), Instruction::Undefined);
            assert_eq!(defined, op.is_defined(), "mismatch for {op}");
        }
    }

    #[test]
    fn test_family_widths() {
        let table = JumpTable::shared();
        assert!(matches!(table.get(OpCode::PUSH0), Instruction::Push(0)));
        assert!(matches!(table.get(OpCode::PUSH32), Instruction::Push(32)));
        assert!(matches!(table.get(OpCode::DUP16), Instruction::Dup(16)));
        assert!(matches!(table.get(OpCode::SWAP1), Instruction::Swap(1)));
        assert!(matches!(table.get(OpCode::LOG4), Instruction::Log(4)));
    }

    #[test]
    fn test_family_entries_follow_opcode_widths() {
        let table = JumpTable::shared();
        for byte in 0x60..=0xa4u8 {
            let op = OpCode::new(byte);
            match table.get(op) {
                Instruction::Push(n) => assert_eq!(n, op.push_size(), "{op}"),
                Instruction::Dup(n) => assert_eq!(n, op.dup_depth(), "{op}"),
                Instruction::Swap(n) => assert_eq!(n, op.swap_depth(), "{op}"),
                Instruction::Log(n) => assert_eq!(Some(n), op.log_topics(), "{op}"),
                other => panic!("{op} mapped to {other:?}"),
            }
        }
    }
}
