//! Operand stack of one call frame

use crate::error::{EvmError, EvmResult};
use sevm_primitives::Word;

/// Maximum stack depth
pub const MAX_STACK_SIZE: usize = 1024;

/// Operand stack (max 1024 words)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    data: Vec<Word>,
}

impl Stack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MAX_STACK_SIZE),
        }
    }

    /// Push a word
    pub fn push(&mut self, value: Word) -> EvmResult<()> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(EvmError::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop the top word
    pub fn pop(&mut self) -> EvmResult<Word> {
        self.data.pop().ok_or(EvmError::StackUnderflow)
    }

    /// Pop `N` words, top first.
    pub fn pop_n<const N: usize>(&mut self) -> EvmResult<[Word; N]> {
        if self.data.len() < N {
            return Err(EvmError::StackUnderflow);
        }
        let mut out = [Word::zero(); N];
        for slot in out.iter_mut() {
            *slot = self.pop()?;
        }
        Ok(out)
    }

    /// Top of the stack
    pub fn peek(&self) -> EvmResult<&Word> {
        self.data.last().ok_or(EvmError::StackUnderflow)
    }

    /// Mutable top of the stack, overwritten in place by binary ops
    pub fn peek_mut(&mut self) -> EvmResult<&mut Word> {
        self.data.last_mut().ok_or(EvmError::StackUnderflow)
    }

    /// Swap top with the item at `depth` (1 = second item)
    pub fn swap(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth >= self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        let len = self.data.len();
        self.data.swap(len - 1, len - 1 - depth);
        Ok(())
    }

    /// Push a copy of the item at `depth` (1 = top)
    pub fn dup(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth > self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        let value = self.data[self.data.len() - depth];
        self.push(value)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Items from bottom to top
    pub fn as_slice(&self) -> &[Word] {
        &self.data
    }
}
