//! Frame, transaction and account-info opcodes

use super::{mem_range, padded_slice, push_word};
use crate::context::biguint_to_word;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::{
    address_from_word, word_from_address, word_from_h256, word_to_u64_saturated, Word,
};

/// Constant reported by `RETURNDATASIZE`; return data is not buffered.
const RETURN_DATA_SIZE_PLACEHOLDER: u64 = 32;

pub(crate) fn address(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let value = word_from_address(&frame.contract.address);
    push_word(frame, value)
}

pub(crate) fn balance(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    let address = address_from_word(slot);
    *slot = interp.view().balance(address);
    interp.run.rw_set.record_read(address);
    Ok(Control::Continue)
}

pub(crate) fn origin(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, word_from_address(&interp.env.tx.origin))
}

pub(crate) fn caller(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let value = word_from_address(&frame.contract.caller);
    push_word(frame, value)
}

pub(crate) fn callvalue(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let value = frame.contract.value;
    push_word(frame, value)
}

pub(crate) fn calldataload(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    let start = word_to_u64_saturated(slot);
    *slot = Word::from_big_endian(&padded_slice(&frame.contract.input, start, 32));
    Ok(Control::Continue)
}

pub(crate) fn calldatasize(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let len = frame.contract.input.len();
    push_word(frame, Word::from(len))
}

pub(crate) fn calldatacopy(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [mem_offset, data_offset, size] = frame.stack.pop_n::<3>()?;
    let (mem_offset, len) = mem_range(&mem_offset, &size)?;
    let data = padded_slice(&frame.contract.input, word_to_u64_saturated(&data_offset), len);
    frame.memory.set(mem_offset, len, &data)?;
    Ok(Control::Continue)
}

pub(crate) fn codesize(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let len = frame.contract.code.len();
    push_word(frame, Word::from(len))
}

pub(crate) fn codecopy(_: &mut usize, _: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let [mem_offset, code_offset, size] = frame.stack.pop_n::<3>()?;
    let (mem_offset, len) = mem_range(&mem_offset, &size)?;
    let data = padded_slice(&frame.contract.code, word_to_u64_saturated(&code_offset), len);
    frame.memory.set(mem_offset, len, &data)?;
    Ok(Control::Continue)
}

pub(crate) fn gasprice(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let price = biguint_to_word(&interp.env.tx.gas_price, "gas price")?;
    push_word(frame, price)
}

pub(crate) fn extcodesize(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    let address = address_from_word(slot);
    *slot = Word::from(interp.state.get_code_size(&address));
    interp.run.rw_set.record_read(address);
    Ok(Control::Continue)
}

pub(crate) fn extcodecopy(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [target, mem_offset, code_offset, size] = frame.stack.pop_n::<4>()?;
    let address = address_from_word(&target);
    let (mem_offset, len) = mem_range(&mem_offset, &size)?;
    let code = interp.state.get_code(&address);
    let data = padded_slice(&code, word_to_u64_saturated(&code_offset), len);
    frame.memory.set(mem_offset, len, &data)?;
    interp.run.rw_set.record_read(address);
    Ok(Control::Continue)
}

pub(crate) fn returndatasize(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(RETURN_DATA_SIZE_PLACEHOLDER))
}

/// Pops its operands and copies nothing.
pub(crate) fn returndatacopy(
    _: &mut usize,
    _: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    frame.stack.pop_n::<3>()?;
    Ok(Control::Continue)
}

pub(crate) fn extcodehash(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    let address = address_from_word(slot);
    *slot = if interp.state.is_empty(&address) {
        Word::zero()
    } else {
        word_from_h256(&interp.state.get_code_hash(&address))
    };
    interp.run.rw_set.record_read(address);
    Ok(Control::Continue)
}

pub(crate) fn selfbalance(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let address = frame.contract.address;
    let balance = interp.view().balance(address);
    interp.run.rw_set.record_read(address);
    push_word(frame, balance)
}
