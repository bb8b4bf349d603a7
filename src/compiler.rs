//! # Compiler Module
//!
//! Single left-to-right pass over the filtered text producing resolved
//! bytecode. Three compile-time optimizations happen in this pass, in
//! order of precedence at each cursor position:
//!
//! 1. the literal `[-]` idiom becomes a single `SetZero`;
//! 2. a maximal run of `+ - < >` folds into per-offset `Add`
//!    instructions plus one trailing `Shift`;
//! 3. `[`/`]` pairs resolve to absolute jump targets via a stack.

use crate::cursor::Cursor;
use crate::error::{TapeError, TapeResult};
use crate::filter;
use crate::opcode::{Instruction, Program};

use rustc_hash::FxHashMap;

pub struct Compiler {
    cursor: Cursor,
    instructions: Vec<Instruction>,
    /// One entry per unmatched `[` seen so far: the bytecode index of
    /// its placeholder `LoopStart`. Empty at the end of a well-formed
    /// compilation.
    open_loops: Vec<usize>,
}

impl Compiler {
    /// Filters `source` and prepares a compiler over the result.
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(filter::strip(source.as_bytes())),
            instructions: Vec::new(),
            open_loops: Vec::new(),
        }
    }

    /// Runs the single compilation pass. Consumes the compiler; the
    /// program text is discarded once the bytecode is emitted.
    pub fn compile(mut self) -> TapeResult<Program> {
        while self.cursor.has_more() {
            if self.match_zero_idiom()? {
                continue;
            }

            match self.cursor.current()? {
                b'+' | b'-' | b'<' | b'>' => self.fold_run()?,
                b'.' => {
                    self.emit(Instruction::Print);
                    self.cursor.advance()?;
                }
                b',' => {
                    self.emit(Instruction::Read);
                    self.cursor.advance()?;
                }
                b'[' => {
                    self.open_loops.push(self.instructions.len());
                    // Placeholder target, patched when the matching `]`
                    // closes the loop.
                    self.emit(Instruction::LoopStart { exit: 0 });
                    self.cursor.advance()?;
                }
                b']' => {
                    self.close_loop()?;
                    self.cursor.advance()?;
                }
                // strip() only lets the eight instruction bytes through.
                _ => self.cursor.advance()?,
            }
        }

        if !self.open_loops.is_empty() {
            return Err(TapeError::unbalanced(
                format!("{} unclosed '['", self.open_loops.len()),
                self.cursor.len(),
            ));
        }

        Ok(Program::new(self.instructions))
    }

    #[inline]
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Recognizes the literal three-byte `[-]` pattern via lookahead.
    /// Strictly syntactic — `[+]` and semantically equivalent loops are
    /// deliberately not matched. On a match the three bytes are consumed
    /// and a literal `[-]` is never compiled as a loop.
    fn match_zero_idiom(&mut self) -> TapeResult<bool> {
        let pos = self.cursor.position();
        if pos + 3 > self.cursor.len() {
            return Ok(false);
        }

        if self.cursor.peek(pos)? == b'['
            && self.cursor.peek(pos + 1)? == b'-'
            && self.cursor.peek(pos + 2)? == b']'
        {
            self.emit(Instruction::SetZero);
            for _ in 0..3 {
                self.cursor.advance()?;
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Greedy, maximal run folding. Scans forward over `+ - < >`,
    /// accumulating per-offset byte deltas into a transient map while
    /// `<`/`>` move the relative offset; the run terminates at the first
    /// `[ ] . ,` or end of input, leaving the cursor on the terminator.
    ///
    /// Emits one `Add` per nonzero delta in ascending-offset order
    /// (offsets are disjoint, so any stable order is sound), then one
    /// `Shift` carrying the net offset iff it is nonzero.
    fn fold_run(&mut self) -> TapeResult<()> {
        let mut deltas: FxHashMap<isize, u8> = FxHashMap::default();
        let mut offset: isize = 0;

        while self.cursor.has_more() {
            match self.cursor.current()? {
                b'+' => {
                    let delta = deltas.entry(offset).or_insert(0);
                    *delta = delta.wrapping_add(1);
                }
                b'-' => {
                    let delta = deltas.entry(offset).or_insert(0);
                    *delta = delta.wrapping_sub(1);
                }
                b'<' => offset -= 1,
                b'>' => offset += 1,
                _ => break,
            }
            self.cursor.advance()?;
        }

        let mut entries: Vec<(isize, u8)> = deltas
            .into_iter()
            .filter(|&(_, delta)| delta != 0)
            .collect();
        entries.sort_unstable_by_key(|&(offset, _)| offset);

        for (offset, delta) in entries {
            self.emit(Instruction::Add { offset, delta });
        }
        if offset != 0 {
            self.emit(Instruction::Shift { amount: offset });
        }

        Ok(())
    }

    /// Closes the innermost open loop: emits a `LoopEnd` pointing back at
    /// the matching `LoopStart`, then patches that `LoopStart`'s exit to
    /// the index just past the `LoopEnd`.
    fn close_loop(&mut self) -> TapeResult<()> {
        let entry = match self.open_loops.pop() {
            Some(entry) => entry,
            None => {
                return Err(TapeError::unbalanced(
                    "']' with no matching '['",
                    self.cursor.position(),
                ));
            }
        };

        self.emit(Instruction::LoopEnd { entry });
        self.instructions[entry] = Instruction::LoopStart {
            exit: self.instructions.len(),
        };

        Ok(())
    }
}
