//! Opcode handlers grouped by concern
//!
//! Every handler has the [`Handler`](crate::table::Handler) shape except the
//! width-parameterized families in [`stack`].

pub(crate) mod arithmetic;
pub(crate) mod bitwise;
pub(crate) mod block;
pub(crate) mod control;
pub(crate) mod environment;
pub(crate) mod hash;
pub(crate) mod memory;
pub(crate) mod stack;
pub(crate) mod storage;
pub(crate) mod system;

use crate::contract::CallFrame;
use crate::error::{EvmError, EvmResult};
use crate::interpreter::Control;
use sevm_primitives::{word_to_usize, Word};

/// Word as a host-sized offset or length
pub(crate) fn as_usize(word: &Word) -> EvmResult<usize> {
    word_to_usize(word).ok_or(EvmError::InvalidMemoryAccess)
}

/// Memory range from an offset/size pair; the offset is ignored when size is 0.
pub(crate) fn mem_range(offset: &Word, size: &Word) -> EvmResult<(usize, usize)> {
    let size = as_usize(size)?;
    if size == 0 {
        return Ok((0, 0));
    }
    Ok((as_usize(offset)?, size))
}

/// `size` bytes of `data` from `start`, right-padded with zeros
pub(crate) fn padded_slice(data: &[u8], start: u64, size: usize) -> Vec<u8> {
    let mut out = vec![0u8; size];
    let len = data.len() as u64;
    let start = start.min(len) as usize;
    let end = start.saturating_add(size).min(data.len());
    out[..end - start].copy_from_slice(&data[start..end]);
    out
}

/// Replace the top two operands with `op(top, second)`, written into the
/// second operand's slot.
pub(crate) fn binary(
    frame: &mut CallFrame,
    op: impl FnOnce(Word, Word) -> Word,
) -> EvmResult<Control> {
    let x = frame.stack.pop()?;
    let y = frame.stack.peek_mut()?;
    *y = op(x, *y);
    Ok(Control::Continue)
}

/// Replace the top operand with `op(top)` in place
pub(crate) fn unary(frame: &mut CallFrame, op: impl FnOnce(Word) -> Word) -> EvmResult<Control> {
    let x = frame.stack.peek_mut()?;
    *x = op(*x);
    Ok(Control::Continue)
}

/// Push `value` and continue
pub(crate) fn push_word(frame: &mut CallFrame, value: Word) -> EvmResult<Control> {
    frame.stack.push(value)?;
    Ok(Control::Continue)
}
