//! Block and chain info. Pure reads of the environment; nothing is recorded
//! in the access set.

use super::push_word;
use crate::context::biguint_to_word;
use crate::contract::CallFrame;
use crate::error::EvmResult;
use crate::interpreter::{Control, Interpreter};
use sevm_primitives::{word_from_address, word_from_h256, word_to_u64_saturated, Word};

pub(crate) fn blockhash(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let slot = frame.stack.peek_mut()?;
    let block = &interp.env.block;
    // u64::MAX is never inside the window, so saturation cannot produce a hit
    let number = word_to_u64_saturated(slot);
    *slot = if block.in_hash_window(number) {
        word_from_h256(&block.hash_of(number))
    } else {
        Word::zero()
    };
    Ok(Control::Continue)
}

pub(crate) fn coinbase(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, word_from_address(&interp.env.block.coinbase))
}

pub(crate) fn timestamp(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(interp.env.block.timestamp))
}

pub(crate) fn number(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(interp.env.block.number))
}

pub(crate) fn difficulty(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    let difficulty = biguint_to_word(&interp.env.block.difficulty, "difficulty")?;
    push_word(frame, difficulty)
}

pub(crate) fn gaslimit(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(interp.env.block.gas_limit))
}

pub(crate) fn chainid(
    _: &mut usize,
    interp: &mut Interpreter<'_>,
    frame: &mut CallFrame,
) -> EvmResult<Control> {
    push_word(frame, Word::from(interp.env.chain.chain_id))
}
