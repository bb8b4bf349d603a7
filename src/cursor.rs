//! # Cursor Module
//!
//! A random-access, position-addressable view over the filtered program
//! text. The compiler drives it strictly forward, but single-step
//! retreat and absolute seek are part of the contract so lookahead
//! never has to copy the text.

use crate::error::{TapeError, TapeResult};

/// Position-addressable cursor over the filtered text.
///
/// The position ranges over `[0, len]`: `len` means the text is
/// exhausted. All reads require `position < len`.
#[derive(Debug, Clone)]
pub struct Cursor {
    text: Vec<u8>,
    pos: usize,
}

impl Cursor {
    pub fn new(text: Vec<u8>) -> Self {
        Self { text, pos: 0 }
    }

    /// Current position in the filtered text.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the filtered text.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `true` iff at least one byte remains at or after the position.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.pos < self.text.len()
    }

    /// The byte at the current position.
    pub fn current(&self) -> TapeResult<u8> {
        self.text
            .get(self.pos)
            .copied()
            .ok_or_else(|| TapeError::out_of_bounds("read past end of program text", self.pos))
    }

    /// Read-only random access for lookahead; does not move the cursor.
    pub fn peek(&self, index: usize) -> TapeResult<u8> {
        self.text
            .get(index)
            .copied()
            .ok_or_else(|| TapeError::out_of_bounds("peek past end of program text", index))
    }

    /// Moves one position forward. Moving from `len` to `len + 1` is an
    /// error; moving onto `len` (exhausted) is not.
    pub fn advance(&mut self) -> TapeResult<()> {
        if self.pos >= self.text.len() {
            return Err(TapeError::out_of_bounds(
                "advance past end of program text",
                self.pos,
            ));
        }
        self.pos += 1;
        Ok(())
    }

    /// Moves one position backward.
    pub fn retreat(&mut self) -> TapeResult<()> {
        if self.pos == 0 {
            return Err(TapeError::out_of_bounds(
                "retreat before start of program text",
                self.pos,
            ));
        }
        self.pos -= 1;
        Ok(())
    }

    /// Absolute jump to `pos`, which must address an existing byte.
    pub fn seek(&mut self, pos: usize) -> TapeResult<()> {
        if pos >= self.text.len() {
            return Err(TapeError::out_of_bounds("seek outside program text", pos));
        }
        self.pos = pos;
        Ok(())
    }
}
