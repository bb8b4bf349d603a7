use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use tapevm::runner;
use tapevm::vm::Config;

use std::io::{self, Write};

/// Interactive session: each line is compiled and executed against a
/// fresh tape. `,` reads from stdin, `.` writes to stdout.
pub fn start(config: Config) {
    let mut editor = match DefaultEditor::new() {
        Ok(ed) => ed,
        Err(e) => {
            eprintln!("failed to initialize REPL: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        let line = match editor.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => {
                eprintln!("readline error: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        if line.trim() == ".exit" {
            break;
        }

        let _ = editor.add_history_entry(&line);

        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        match runner::run_with_config(&line, &mut stdin, &mut stdout, config, None) {
            Ok(()) => {
                let _ = stdout.flush();
                println!();
            }
            Err(e) => eprintln!("{}", e),
        }
    }
}
