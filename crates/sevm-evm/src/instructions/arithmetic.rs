//! ADD through SIGNEXTEND

use super::binary;
use crate::arith;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};

pub(crate) fn add(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x.overflowing_add(y).0)
}

pub(crate) fn mul(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x.overflowing_mul(y).0)
}

pub(crate) fn sub(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x.overflowing_sub(y).0)
}

pub(crate) fn div(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::div)
}

pub(crate) fn sdiv(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::sdiv)
}

pub(crate) fn rem(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::rem)
}

pub(crate) fn smod(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::smod)
}

pub(crate) fn addmod(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let x = frame.stack.pop()?;
    let y = frame.stack.pop()?;
    let n = frame.stack.peek_mut()?;
    *n = arith::addmod(x, y, *n);
    Ok(Control::Continue)
}

pub(crate) fn mulmod(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let x = frame.stack.pop()?;
    let y = frame.stack.pop()?;
    let n = frame.stack.peek_mut()?;
    *n = arith::mulmod(x, y, *n);
    Ok(Control::Continue)
}

pub(crate) fn exp(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::exp)
}

pub(crate) fn signextend(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    binary(frame, arith::signextend)
}
