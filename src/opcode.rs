//! # Opcode Module
//!
//! The flat bytecode instruction set executed by the tapevm virtual
//! machine. Instructions are encoded as a Rust enum for type safety
//! during compilation, then dispatched via `match` in the VM's hot loop.
//!
//! ## Design Notes
//! - Jump targets are absolute indices into the instruction array — the
//!   arena+index pattern, no object graph, no indirection.
//! - `Add` carries a relative tape offset so one folded run can touch
//!   several cells without moving the pointer in between.
//! - The bytecode is a transient in-memory representation; no stable
//!   serialized format is promised.

use std::fmt;

// -----------------------------------------------------------------------------
// INSTRUCTION SET
// -----------------------------------------------------------------------------

/// A single VM instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `tape[ptr + offset] += delta`, wrapping modulo 256. A folded run
    /// of `+`/`-` at one relative offset collapses into one `Add`; its
    /// `delta` is the run's net change (a decrement run carries the
    /// two's-complement byte, e.g. `-1` is `255`).
    Add { offset: isize, delta: u8 },
    /// `ptr += amount` — the net pointer movement of a folded run.
    Shift { amount: isize },
    /// `tape[ptr] = 0`, compiled from the literal `[-]` idiom.
    SetZero,
    /// Emits the current cell as one output byte.
    Print,
    /// Stores one input byte into the current cell.
    Read,
    /// If the current cell is zero, jump to `exit` — the index just past
    /// the matching `LoopEnd`.
    LoopStart { exit: usize },
    /// If the current cell is nonzero, jump to `entry` — the index of
    /// the matching `LoopStart`.
    LoopEnd { entry: usize },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Add { offset, delta } => {
                write!(f, "ADD {:+} @ {:+}", *delta as i8, offset)
            }
            Instruction::Shift { amount } => write!(f, "SHIFT {:+}", amount),
            Instruction::SetZero => write!(f, "SET_ZERO"),
            Instruction::Print => write!(f, "PRINT"),
            Instruction::Read => write!(f, "READ"),
            Instruction::LoopStart { exit } => write!(f, "LOOP_START -> {}", exit),
            Instruction::LoopEnd { entry } => write!(f, "LOOP_END -> {}", entry),
        }
    }
}

// -----------------------------------------------------------------------------
// PROGRAM — Resolved Bytecode
// -----------------------------------------------------------------------------

/// A compiled program: an ordered instruction sequence whose indices are
/// stable addresses used as jump targets. Immutable after compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Program {
    /// Renders a human-readable bytecode listing, one instruction per
    /// line with its index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{:>5}  {}", idx, instruction)?;
        }
        Ok(())
    }
}
