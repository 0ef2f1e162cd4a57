//! SHA3 (Keccak-256)

use super::mem_range;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::Word;

/// Hash `size` bytes of memory at `offset` with the interpreter's scratch
/// hasher; the digest replaces `size` on the stack.
pub(crate) fn sha3(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let offset = frame.stack.pop()?;
    let size = frame.stack.peek_mut()?;
    let (offset, len) = mem_range(&offset, size)?;
    let data = frame.memory.get(offset, len)?;
    *size = Word::from_big_endian(interp.hasher.digest(&data));
    Ok(Control::Continue)
}
