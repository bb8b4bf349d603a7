mod repl;

use clap::{Parser, ValueEnum};
use std::io;
use std::process;

use tapevm::compiler::Compiler;
use tapevm::runner;
use tapevm::vm::{Config, EofPolicy};

#[derive(Parser)]
#[command(name = "tapevm")]
#[command(about = "An optimizing compiler and VM for the eight-instruction tape language", long_about = None)]
struct Cli {
    /// Program file to run; omit for an interactive session.
    file: Option<String>,

    /// Number of cells on the memory tape.
    #[arg(long, default_value_t = tapevm::vm::DEFAULT_TAPE_CAPACITY)]
    tape_size: usize,

    /// What `,` does once input is exhausted.
    #[arg(long, value_enum, default_value_t = EofArg::Zero)]
    eof: EofArg,

    /// Compile only and print the bytecode listing instead of running.
    #[arg(long)]
    dump: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EofArg {
    Zero,
    Unchanged,
    Fail,
}

impl From<EofArg> for EofPolicy {
    fn from(arg: EofArg) -> Self {
        match arg {
            EofArg::Zero => EofPolicy::Zero,
            EofArg::Unchanged => EofPolicy::Unchanged,
            EofArg::Fail => EofPolicy::Fail,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = Config {
        tape_capacity: cli.tape_size,
        eof_policy: cli.eof.into(),
        ..Config::default()
    };

    match cli.file {
        Some(file) => run_file(&file, config, cli.dump),
        None => repl::start(config),
    }
}

fn run_file(path: &str, config: Config, dump: bool) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", path, e);
            process::exit(1);
        }
    };

    if dump {
        match Compiler::new(&source).compile() {
            Ok(program) => print!("{}", program),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if let Err(e) = runner::run_with_config(&source, &mut stdin, &mut stdout, config, None) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
