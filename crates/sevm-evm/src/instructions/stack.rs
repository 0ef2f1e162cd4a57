//! POP and the width-parameterized PUSH, DUP, SWAP and LOG families

use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::Word;

pub(crate) fn pop(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    frame.stack.pop()?;
    Ok(Control::Continue)
}

/// `PUSHn`: push the `n` immediate bytes after `pc` and step over them.
///
/// Immediates cut short by the end of the code are right-padded with zeros.
pub(crate) fn push(n: usize, pc: &mut usize, frame: &mut CallFrame) -> EvmResult<Control> {
    let code = &frame.contract.code;
    let start = (*pc + 1).min(code.len());
    let end = (start + n).min(code.len());

    let mut buf = [0u8; 32];
    let available = end - start;
    buf[32 - n..32 - n + available].copy_from_slice(&code[start..end]);

    frame.stack.push(Word::from_big_endian(&buf))?;
    *pc += n;
    Ok(Control::Continue)
}

/// `DUPn`
pub(crate) fn dup(n: usize, frame: &mut CallFrame) -> EvmResult<Control> {
    frame.stack.dup(n)?;
    Ok(Control::Continue)
}

/// `SWAPn`: exchange the top with the item `n` below it
pub(crate) fn swap(n: usize, frame: &mut CallFrame) -> EvmResult<Control> {
    frame.stack.swap(n)?;
    Ok(Control::Continue)
}

/// `LOGn`: pops offset, size and `n` topics. Logs are not recorded.
pub(crate) fn log(n: usize, frame: &mut CallFrame) -> EvmResult<Control> {
    for _ in 0..n + 2 {
        frame.stack.pop()?;
    }
    Ok(Control::Continue)
}
