//! # Tapevm — Optimizing Tape-Machine Compiler & VM
//!
//! Tapevm compiles programs written in the classic eight-instruction
//! tape language (`+ - < > . , [ ]`) into a flat bytecode array and
//! executes it with a tight dispatch loop — no AST, no virtual dispatch
//! in the hot path.
//!
//! ## Architecture
//! Source → Filter → Cursor → Compiler → Bytecode → VM → Output
//!
//! ## Key Features
//! - Flat, indexable instruction array with absolute jump targets.
//! - Run folding: a maximal run of `+ - < >` collapses into a handful of
//!   weighted `Add` instructions plus a single trailing `Shift`.
//! - `[-]` recognized at compile time as a single `SetZero`.
//! - `FxHashMap` delta accumulation in the folding hot path.
//! - Bounds-checked tape access — walking off the tape is a reported
//!   runtime error, never silent memory corruption.
//! - Cooperatively cancellable dispatch loop.

pub mod compiler;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod opcode;
pub mod runner;
pub mod vm;
