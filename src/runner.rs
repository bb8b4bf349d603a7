//! # Runner Module
//!
//! Ties Filter → Compiler → VM together for one program. Single-shot:
//! compile errors abort before any execution side effect, runtime errors
//! abort at the failing instruction, and there is no retry policy.

use crate::compiler::Compiler;
use crate::error::TapeResult;
use crate::vm::{Config, Vm};

use std::io::{Read, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Compiles and runs `source` with the default configuration, wiring
/// `,`/`.` to the supplied collaborators.
pub fn run(source: &str, input: &mut dyn Read, output: &mut dyn Write) -> TapeResult<()> {
    run_with_config(source, input, output, Config::default(), None)
}

/// Compiles and runs `source` with an explicit configuration and an
/// optional cancellation flag.
pub fn run_with_config(
    source: &str,
    input: &mut dyn Read,
    output: &mut dyn Write,
    config: Config,
    cancel: Option<Arc<AtomicBool>>,
) -> TapeResult<()> {
    let program = Compiler::new(source).compile()?;

    let mut vm = Vm::with_config(program, input, output, config);
    if let Some(flag) = cancel {
        vm.set_cancel_flag(flag);
    }
    vm.run()
}
