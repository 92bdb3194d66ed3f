//! Forward-only byte cursor over an in-memory buffer
//!
//! Every read either succeeds and advances, or returns `None` and leaves the
//! position untouched. Callers map `None` to the stage they were parsing.

use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read one byte
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Read bytes up to the next zero byte and step past the terminator.
    /// The returned slice excludes the terminator.
    pub fn read_cstring(&mut self) -> Option<&'a [u8]> {
        let rest = self.data.get(self.pos..)?;
        let len = rest.iter().position(|&b| b == 0)?;
        self.pos += len + 1;
        Some(&rest[..len])
    }

    /// Advance by `count` bytes without looking at them
    pub fn skip(&mut self, count: usize) -> Option<()> {
        if self.remaining() < count {
            return None;
        }
        self.pos += count;
        Some(())
    }

    /// Look at the next `count` bytes without consuming them
    pub fn peek(&self, count: usize) -> Option<&'a [u8]> {
        self.data.get(self.pos..self.pos.checked_add(count)?)
    }

    pub fn read_u16_le(&mut self) -> Option<u16> {
        let value = LittleEndian::read_u16(self.peek(2)?);
        self.pos += 2;
        Some(value)
    }
}
