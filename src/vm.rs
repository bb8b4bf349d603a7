//! # VM Module
//!
//! Executes resolved bytecode against a fixed-capacity byte tape. The
//! dispatch loop is a single `match` over the flat instruction array;
//! loop jumps replace the instruction pointer, everything else
//! increments it, and execution halts when the pointer runs past the
//! program.
//!
//! ## Design Notes
//! - Cell arithmetic wraps modulo 256 — no trap, no saturation.
//! - Every tape access is bounds-checked; an index outside
//!   `[0, capacity)` halts execution with `CellIndexOutOfRange` instead
//!   of corrupting adjacent memory.
//! - Input and output are abstract one-byte-at-a-time collaborators;
//!   buffering, if any, is theirs.

use crate::error::{TapeError, TapeResult};
use crate::opcode::{Instruction, Program};

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reference tape sizing: one mebibyte of cells.
pub const DEFAULT_TAPE_CAPACITY: usize = 1024 * 1024;

/// Instructions dispatched between cancellation-flag checks.
pub const DEFAULT_CANCEL_INTERVAL: u64 = 65_536;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// What `,` does when the input source is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Store 0 into the current cell.
    #[default]
    Zero,
    /// Leave the current cell unchanged.
    Unchanged,
    /// Halt with `InputExhausted`.
    Fail,
}

/// Per-run VM configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Number of cells on the tape.
    pub tape_capacity: usize,
    /// End-of-input behavior for `,`.
    pub eof_policy: EofPolicy,
    /// How many instructions run between cooperative cancellation
    /// checks. Must be nonzero.
    pub cancel_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_capacity: DEFAULT_TAPE_CAPACITY,
            eof_policy: EofPolicy::Zero,
            cancel_interval: DEFAULT_CANCEL_INTERVAL,
        }
    }
}

// -----------------------------------------------------------------------------
// VIRTUAL MACHINE
// -----------------------------------------------------------------------------

/// The virtual machine. Owns its tape and bytecode for one run; nothing
/// is shared across runs, so independent instances may execute
/// concurrently without coordination.
pub struct Vm<'io> {
    program: Program,
    ip: usize,
    ptr: isize,
    tape: Vec<u8>,
    config: Config,
    cancel: Option<Arc<AtomicBool>>,
    input: &'io mut dyn Read,
    output: &'io mut dyn Write,
}

impl<'io> Vm<'io> {
    pub fn new(program: Program, input: &'io mut dyn Read, output: &'io mut dyn Write) -> Self {
        Self::with_config(program, input, output, Config::default())
    }

    pub fn with_config(
        program: Program,
        input: &'io mut dyn Read,
        output: &'io mut dyn Write,
        config: Config,
    ) -> Self {
        Self {
            program,
            ip: 0,
            ptr: 0,
            tape: vec![0; config.tape_capacity],
            config,
            cancel: None,
            input,
            output,
        }
    }

    /// Installs a cancellation flag. The dispatch loop polls it every
    /// `config.cancel_interval` instructions and halts with
    /// `Interrupted` once it reads `true`.
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel = Some(flag);
    }

    /// The memory tape, for post-run inspection.
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// The tape pointer, for post-run inspection.
    pub fn pointer(&self) -> isize {
        self.ptr
    }

    /// Runs the program to completion. Output produced before a runtime
    /// failure has already been delivered to the sink and stays valid.
    pub fn run(&mut self) -> TapeResult<()> {
        let len = self.program.len();
        let mut dispatched: u64 = 0;

        while self.ip < len {
            dispatched += 1;
            if dispatched >= self.config.cancel_interval {
                dispatched = 0;
                if let Some(flag) = &self.cancel {
                    if flag.load(Ordering::Relaxed) {
                        return Err(TapeError::interrupted(self.ip));
                    }
                }
            }

            match self.program.instructions[self.ip] {
                Instruction::Add { offset, delta } => {
                    let idx = self.cell_index(offset)?;
                    self.tape[idx] = self.tape[idx].wrapping_add(delta);
                }
                Instruction::Shift { amount } => {
                    let next = self.ptr + amount;
                    if next < 0 || next >= self.tape.len() as isize {
                        return Err(TapeError::cell_out_of_range(
                            format!("pointer shifted to {}", next),
                            self.ip,
                        ));
                    }
                    self.ptr = next;
                }
                Instruction::SetZero => {
                    let idx = self.cell_index(0)?;
                    self.tape[idx] = 0;
                }
                Instruction::Print => {
                    let idx = self.cell_index(0)?;
                    let byte = self.tape[idx];
                    self.output
                        .write_all(&[byte])
                        .map_err(|e| TapeError::io(e, self.ip))?;
                }
                Instruction::Read => self.read_cell()?,
                Instruction::LoopStart { exit } => {
                    let idx = self.cell_index(0)?;
                    if self.tape[idx] == 0 {
                        self.ip = exit;
                        continue;
                    }
                }
                Instruction::LoopEnd { entry } => {
                    let idx = self.cell_index(0)?;
                    if self.tape[idx] != 0 {
                        self.ip = entry;
                        continue;
                    }
                }
            }

            self.ip += 1;
        }

        Ok(())
    }

    /// Resolves `ptr + offset` to a tape index, failing with
    /// `CellIndexOutOfRange` when it leaves `[0, capacity)`.
    #[inline]
    fn cell_index(&self, offset: isize) -> TapeResult<usize> {
        let idx = self.ptr + offset;
        if idx < 0 || idx >= self.tape.len() as isize {
            return Err(TapeError::cell_out_of_range(
                format!("cell index {} outside the tape", idx),
                self.ip,
            ));
        }
        Ok(idx as usize)
    }

    fn read_cell(&mut self) -> TapeResult<()> {
        let idx = self.cell_index(0)?;
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(0) => match self.config.eof_policy {
                EofPolicy::Zero => self.tape[idx] = 0,
                EofPolicy::Unchanged => {}
                EofPolicy::Fail => return Err(TapeError::input_exhausted(self.ip)),
            },
            Ok(_) => self.tape[idx] = buf[0],
            Err(e) => return Err(TapeError::io(e, self.ip)),
        }
        Ok(())
    }
}
