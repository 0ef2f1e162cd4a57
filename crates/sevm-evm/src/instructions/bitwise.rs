//! Comparison, bitwise logic and shifts

use super::{binary, unary};
use crate::arith::{self, from_bool};
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};

pub(crate) fn lt(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| from_bool(x < y))
}

pub(crate) fn gt(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| from_bool(x > y))
}

pub(crate) fn slt(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| from_bool(arith::slt(&x, &y)))
}

pub(crate) fn sgt(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| from_bool(arith::sgt(&x, &y)))
}

pub(crate) fn eq(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| from_bool(x == y))
}

pub(crate) fn iszero(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    unary(frame, |x| from_bool(x.is_zero()))
}

pub(crate) fn and(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x & y)
}

pub(crate) fn or(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x | y)
}

pub(crate) fn xor(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, |x, y| x ^ y)
}

pub(crate) fn not(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    unary(frame, |x| !x)
}

pub(crate) fn byte(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::byte)
}

pub(crate) fn shl(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::shl)
}

pub(crate) fn shr(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::shr)
}

pub(crate) fn sar(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    binary(frame, arith::sar)
}
