//! Byte-addressed frame memory

use crate::config::DEFAULT_MAX_MEMORY;
use crate::error::{EvmError, EvmResult};
use sevm_primitives::{word_to_bytes, Word};
use std::borrow::Cow;

/// Growable, zero-initialized frame memory.
///
/// Reads past the end are zero-padded and never grow the buffer; writes grow
/// it to the next 32-byte boundary, up to `limit`.
#[derive(Clone, Debug)]
pub struct Memory {
    data: Vec<u8>,
    limit: usize,
}

impl Memory {
    /// Empty memory capped at `limit` bytes
    pub fn new(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Current size in bytes (always a multiple of 32)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Grow memory to cover `offset..offset + size`.
    pub fn expand(&mut self, offset: usize, size: usize) -> EvmResult<()> {
        if size == 0 {
            return Ok(());
        }
        let end = self.checked_end(offset, size)?;
        if end > self.data.len() {
            let aligned = end.div_ceil(32) * 32;
            self.data.resize(aligned.min(self.limit), 0);
        }
        Ok(())
    }

    /// `size` bytes at `offset`, zero-padded beyond the current length.
    ///
    /// Borrows when the range is fully inside memory.
    pub fn get(&self, offset: usize, size: usize) -> EvmResult<Cow<'_, [u8]>> {
        if size == 0 {
            return Ok(Cow::Borrowed(&[]));
        }
        let end = self.checked_end(offset, size)?;
        if end <= self.data.len() {
            return Ok(Cow::Borrowed(&self.data[offset..end]));
        }
        let mut out = vec![0u8; size];
        if offset < self.data.len() {
            let available = self.data.len() - offset;
            out[..available].copy_from_slice(&self.data[offset..]);
        }
        Ok(Cow::Owned(out))
    }

    /// Owned copy of `size` bytes at `offset`
    pub fn get_copy(&self, offset: usize, size: usize) -> EvmResult<Vec<u8>> {
        self.get(offset, size).map(Cow::into_owned)
    }

    /// Write `value` into `offset..offset + size`.
    ///
    /// A shorter `value` is zero-padded, a longer one truncated.
    pub fn set(&mut self, offset: usize, size: usize, value: &[u8]) -> EvmResult<()> {
        if size == 0 {
            return Ok(());
        }
        self.expand(offset, size)?;
        let copied = value.len().min(size);
        self.data[offset..offset + copied].copy_from_slice(&value[..copied]);
        self.data[offset + copied..offset + size].fill(0);
        Ok(())
    }

    /// Write a big-endian word at `offset`
    pub fn set32(&mut self, offset: usize, value: &Word) -> EvmResult<()> {
        self.set(offset, 32, &word_to_bytes(value))
    }

    /// Write one byte at `offset`
    pub fn set_byte(&mut self, offset: usize, value: u8) -> EvmResult<()> {
        self.expand(offset, 1)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Read a word at `offset`, growing memory to cover it
    pub fn load32(&mut self, offset: usize) -> EvmResult<Word> {
        self.expand(offset, 32)?;
        Ok(Word::from_big_endian(&self.data[offset..offset + 32]))
    }

    /// Raw memory contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn checked_end(&self, offset: usize, size: usize) -> EvmResult<usize> {
        let end = offset
            .checked_add(size)
            .ok_or(EvmError::InvalidMemoryAccess)?;
        if end > self.limit {
            return Err(EvmError::MemoryLimitExceeded {
                requested: end,
                limit: self.limit,
            });
        }
        Ok(end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEMORY)
    }
}
