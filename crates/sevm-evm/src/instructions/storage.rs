//! SLOAD and SSTORE
//!
//! Writes land in the overlay only; committed state is never modified. Both
//! record the executing contract's address, not the slot.

use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::word_to_h256;

pub(crate) fn sload(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let address = frame.contract.address;
    let loc = frame.stack.peek_mut()?;
    *loc = interp.view().storage(address, word_to_h256(loc));
    interp.run.rw_set.record_read(address);
    Ok(Control::Continue)
}

pub(crate) fn sstore(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [loc, value] = frame.stack.pop_n::<2>()?;
    let address = frame.contract.address;
    interp.run.mstate.set_state(address, word_to_h256(&loc), value);
    interp.run.rw_set.record_write(address);
    Ok(Control::Continue)
}
