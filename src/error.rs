//! # Error Module
//!
//! Unified error types for both stages of the tapevm pipeline. Every
//! error carries a classification (`kind`), a human-readable message,
//! and an optional position — a filtered-source offset for compile
//! errors, a bytecode index for runtime errors.

use std::fmt;
use std::io;

// -----------------------------------------------------------------------------
// ERROR KIND — Classification
// -----------------------------------------------------------------------------

/// Classifies what went wrong and in which stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cursor moved past either end of the filtered text. Raised only by
    /// the lexical cursor; reaching it from correctly guarded compiler
    /// code is an internal invariant violation, never a user error.
    OutOfBounds,
    /// A `]` with no matching `[`, or one or more `[` left open at end of
    /// input. Compile-time failure; execution never starts.
    UnbalancedLoop,
    /// The tape pointer (or an `Add` offset) addressed a cell outside
    /// `[0, capacity)`. Runtime failure; execution halts at the
    /// offending instruction.
    CellIndexOutOfRange,
    /// A `,` instruction found the input exhausted while the configured
    /// end-of-input policy requires signaling.
    InputExhausted,
    /// The cancellation flag was observed set between instructions.
    Interrupted,
    /// The input source or output sink reported an I/O failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::OutOfBounds => write!(f, "OutOfBounds"),
            ErrorKind::UnbalancedLoop => write!(f, "UnbalancedLoop"),
            ErrorKind::CellIndexOutOfRange => write!(f, "CellIndexOutOfRange"),
            ErrorKind::InputExhausted => write!(f, "InputExhausted"),
            ErrorKind::Interrupted => write!(f, "Interrupted"),
            ErrorKind::Io => write!(f, "IoError"),
        }
    }
}

// -----------------------------------------------------------------------------
// TAPE ERROR — Unified Error Type
// -----------------------------------------------------------------------------

/// The unified error type for the entire pipeline.
#[derive(Debug, Clone)]
pub struct TapeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Where it went wrong, if known. Compile errors report an offset
    /// into the filtered text; runtime errors report a bytecode index.
    pub pos: Option<usize>,
}

impl TapeError {
    /// Creates a new error with a position.
    pub fn new(kind: ErrorKind, message: impl Into<String>, pos: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: Some(pos),
        }
    }

    /// Creates a new error without position information.
    pub fn no_pos(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: None,
        }
    }

    /// Cursor error at the given filtered-text offset.
    #[inline]
    pub fn out_of_bounds(message: impl Into<String>, pos: usize) -> Self {
        Self::new(ErrorKind::OutOfBounds, message, pos)
    }

    /// Unbalanced-loop compile error at the given filtered-text offset.
    #[inline]
    pub fn unbalanced(message: impl Into<String>, pos: usize) -> Self {
        Self::new(ErrorKind::UnbalancedLoop, message, pos)
    }

    /// Tape-bounds runtime error at the given bytecode index.
    #[inline]
    pub fn cell_out_of_range(message: impl Into<String>, ip: usize) -> Self {
        Self::new(ErrorKind::CellIndexOutOfRange, message, ip)
    }

    /// End-of-input runtime error at the given bytecode index.
    #[inline]
    pub fn input_exhausted(ip: usize) -> Self {
        Self::new(ErrorKind::InputExhausted, "input is exhausted", ip)
    }

    /// Cancellation observed at the given bytecode index.
    #[inline]
    pub fn interrupted(ip: usize) -> Self {
        Self::new(ErrorKind::Interrupted, "execution was cancelled", ip)
    }

    /// Wraps an I/O failure from a collaborator at the given bytecode index.
    #[inline]
    pub fn io(err: io::Error, ip: usize) -> Self {
        Self::new(ErrorKind::Io, err.to_string(), ip)
    }
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} [at {}]: {}", self.kind, pos, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for TapeError {}

/// Convenience type alias for Results throughout tapevm.
pub type TapeResult<T> = std::result::Result<T, TapeError>;
