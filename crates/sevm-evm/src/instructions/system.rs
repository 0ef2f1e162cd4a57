//! Calls, creations, RETURN/REVERT and SELFDESTRUCT
//!
//! Call and create opcodes never execute their target. They hand off to the
//! [`Orchestrator`](crate::Orchestrator) and then resolve what it recorded one
//! level below the current frame.

use super::mem_range;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use crate::opcode::OpCode;
use sevm_primitives::{address_from_word, word_from_address, Address, Word};

pub(crate) fn call(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [_gas, to, value, in_offset, in_size, out_offset, out_size] = frame.stack.pop_n::<7>()?;
    let to = address_from_word(&to);
    let (in_offset, in_len) = mem_range(&in_offset, &in_size)?;
    let out = mem_range(&out_offset, &out_size)?;

    dispatched(interp, OpCode::CALL, Some(to));
    let input = frame.memory.get(in_offset, in_len)?;
    interp
        .host
        .call(interp.run, &frame.contract, to, &input, value)?;
    drop(input);

    resolve_call(interp, frame, OpCode::CALL, out)
}

pub(crate) fn call_code(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [_gas, to, value, in_offset, in_size, out_offset, out_size] = frame.stack.pop_n::<7>()?;
    let to = address_from_word(&to);
    let (in_offset, in_len) = mem_range(&in_offset, &in_size)?;
    let out = mem_range(&out_offset, &out_size)?;

    dispatched(interp, OpCode::CALLCODE, Some(to));
    let input = frame.memory.get(in_offset, in_len)?;
    interp
        .host
        .call_code(interp.run, &frame.contract, to, &input, value)?;
    drop(input);

    resolve_call(interp, frame, OpCode::CALLCODE, out)
}

pub(crate) fn delegate_call(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [_gas, to, in_offset, in_size, out_offset, out_size] = frame.stack.pop_n::<6>()?;
    let to = address_from_word(&to);
    let (in_offset, in_len) = mem_range(&in_offset, &in_size)?;
    let out = mem_range(&out_offset, &out_size)?;

    dispatched(interp, OpCode::DELEGATECALL, Some(to));
    let input = frame.memory.get(in_offset, in_len)?;
    interp
        .host
        .delegate_call(interp.run, &frame.contract, to, &input)?;
    drop(input);

    resolve_call(interp, frame, OpCode::DELEGATECALL, out)
}

pub(crate) fn static_call(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [_gas, to, in_offset, in_size, out_offset, out_size] = frame.stack.pop_n::<6>()?;
    let to = address_from_word(&to);
    let (in_offset, in_len) = mem_range(&in_offset, &in_size)?;
    let out = mem_range(&out_offset, &out_size)?;

    dispatched(interp, OpCode::STATICCALL, Some(to));
    let input = frame.memory.get(in_offset, in_len)?;
    interp
        .host
        .static_call(interp.run, &frame.contract, to, &input)?;
    drop(input);

    resolve_call(interp, frame, OpCode::STATICCALL, out)
}

pub(crate) fn create(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [value, offset, size] = frame.stack.pop_n::<3>()?;
    let (offset, len) = mem_range(&offset, &size)?;
    let init_code = frame.memory.get_copy(offset, len)?;

    dispatched(interp, OpCode::CREATE, None);
    interp
        .host
        .create(interp.run, &frame.contract, init_code, value)?;

    resolve_create(interp, frame)
}

pub(crate) fn create2(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let [endowment, offset, size, salt] = frame.stack.pop_n::<4>()?;
    let (offset, len) = mem_range(&offset, &size)?;
    let init_code = frame.memory.get_copy(offset, len)?;

    dispatched(interp, OpCode::CREATE2, None);
    interp
        .host
        .create2(interp.run, &frame.contract, init_code, endowment, salt)?;

    resolve_create(interp, frame)
}

pub(crate) fn ret(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    record_output(interp, frame)
}

/// Recorded exactly like `RETURN`; telling the two apart is the
/// orchestrator's job.
pub(crate) fn revert(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    record_output(interp, frame)
}

/// Credits the contract's balance to the beneficiary. The contract itself
/// is not debited.
pub(crate) fn selfdestruct(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let beneficiary = address_from_word(&frame.stack.pop()?);
    let address = frame.contract.address;

    let balance = interp.view().balance(address);
    interp
        .run
        .mstate
        .add_balance(interp.state, beneficiary, balance);
    interp.run.rw_set.record_read(address);
    interp.run.rw_set.record_write(beneficiary);
    interp.run.outcome.suicide = true;

    tracing::debug!(%address, %beneficiary, %balance, "selfdestruct");
    Ok(Control::Halt)
}

/// Clear the next level's tables and log the hand-off.
fn dispatched(interp: &mut Interpreter<'_>, op: OpCode, to: Option<Address>) {
    interp.run.prepare_sub_call();
    match to {
        Some(to) => tracing::debug!(op = %op, %to, level = interp.run.level, "dispatching"),
        None => tracing::debug!(op = %op, level = interp.run.level, "dispatching"),
    }
}

/// Resolve a CALL-family opcode from the payloads recorded one level down.
///
/// One payload is copied to `out` and 1 is pushed. None, or several distinct
/// ones, abort the run and leave the stack untouched.
fn resolve_call(
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
    op: OpCode,
    (out_offset, out_len): (usize, usize),
) -> EvmResult<Control> {
    if interp.run.outcome.abort {
        return Ok(Control::Halt);
    }

    let level = interp.run.level + 1;
    let payloads = interp.run.return_data.get(level);
    match payloads {
        [payload] => {
            tracing::debug!(op = %op, level, len = payload.len(), "sub-call resolved");
            frame.memory.set(out_offset, out_len, payload)?;
            frame.stack.push(Word::one())?;
            Ok(Control::Continue)
        }
        _ => {
            let count = payloads.len();
            if count == 0 {
                tracing::warn!(op = %op, level, "sub-call recorded no return payload");
            } else {
                tracing::warn!(op = %op, level, count, "sub-call returned ambiguous payloads");
            }
            interp.run.outcome.abort();
            Ok(Control::Halt)
        }
    }
}

/// Push the address recorded one level down, or zero when none was recorded.
fn resolve_create(interp: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    if interp.run.outcome.abort {
        return Ok(Control::Halt);
    }

    let level = interp.run.level + 1;
    let created = interp.run.create_addr.get(level).unwrap_or(Address::ZERO);
    tracing::debug!(level, address = %created, "create resolved");
    frame.stack.push(word_from_address(&created))?;
    Ok(Control::Continue)
}

fn record_output(interp: &mut Interpreter<'_>, frame: &mut CallFrame) -> EvmResult<Control> {
    let [offset, size] = frame.stack.pop_n::<2>()?;
    let (offset, len) = mem_range(&offset, &size)?;
    let output = frame.memory.get_copy(offset, len)?;
    if !output.is_empty() {
        interp.run.return_data.add(interp.run.level, output.clone());
    }
    frame.output = output;
    Ok(Control::Halt)
}
