//! MLOAD, MSTORE, MSTORE8, MSIZE

use super::{as_usize, push_word};
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::Word;

pub(crate) fn mload(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    *slot = frame.memory.load32(as_usize(slot)?)?;
    Ok(Control::Continue)
}

pub(crate) fn mstore(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let [offset, value] = frame.stack.pop_n::<2>()?;
    frame.memory.set32(as_usize(&offset)?, &value)?;
    Ok(Control::Continue)
}

pub(crate) fn mstore8(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let [offset, value] = frame.stack.pop_n::<2>()?;
    frame.memory.set_byte(as_usize(&offset)?, value.byte(0))?;
    Ok(Control::Continue)
}

pub(crate) fn msize(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let len = frame.memory.len();
    push_word(frame, Word::from(len))
}
