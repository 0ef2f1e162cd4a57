//! Flow control and trivial frame queries

use super::push_word;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::Word;

pub(crate) fn stop(_: &mut usize, _: &mut Interpreter<'_>, _: &mut CallFrame) -> EvmResult<Control> {
    Ok(Control::Halt)
}

/// Jumps only to valid destinations; anything else falls through.
pub(crate) fn jump(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let dest = frame.stack.pop()?;
    Ok(jump_or_continue(frame, &dest))
}

/// The condition is popped and ignored: only reachable destinations matter
/// here, not which branch a real execution would take.
pub(crate) fn jumpi(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let [dest, _condition] = frame.stack.pop_n::<2>()?;
    Ok(jump_or_continue(frame, &dest))
}

pub(crate) fn pc(pc: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    push_word(frame, Word::from(*pc))
}

pub(crate) fn gas(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(interp.config.gas_stand_in))
}

pub(crate) fn jumpdest(_: &mut usize, _: &mut Interpreter<'_>, _: &mut CallFrame) -> EvmResult<Control> {
    Ok(Control::Continue)
}

pub(crate) fn invalid(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    _: &mut CallFrame,
) -> EvmResult<Control> {
    interp.run.outcome.result = false;
    Ok(Control::Halt)
}

fn jump_or_continue(frame: &CallFrame, dest: &Word) -> Control {
    match frame.contract.jump_target(dest) {
        Some(target) => Control::Jump(target),
        None => Control::Continue,
    }
}
