use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use snakeforth::runtime::{
    built_ins::register_builtin_words,
    error,
    interpreter::{CodeManagement, Interpreter, forth_interpreter::ForthInterpreter},
};
use std::{io::Write, process::ExitCode};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// The path used in diagnostics for `--eval` lines.
const EVAL_PATH: &str = "<eval>";

/// The path used in diagnostics for lines typed at the prompt.
const REPL_PATH: &str = "<repl>";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script files to run, in order.
    files: Vec<String>,

    /// A line of source to run after the script files.  May be given more than once.
    #[arg(short, long)]
    eval: Vec<String>,

    /// Enter the interactive prompt after running the script files and eval lines.  The prompt is
    /// entered anyway when neither are given.
    #[arg(short, long)]
    interactive: bool,

    /// A comma-separated list of `tracing` targets and levels to enable, for example
    /// `warn,snakeforth::lang::compilation=debug`.
    ///
    /// see <https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/targets/struct.Targets.html#filtering-with-targets>
    /// for more details on this syntax.
    #[arg(
        long = "trace",
        env = "SNAKEFORTH_TRACE",
        default_value_t = Targets::new().with_default(LevelFilter::WARN),
    )]
    trace_filter: Targets,
}

/// Run a script file, reporting the error that aborted it if any.
fn run_file(interpreter: &mut ForthInterpreter, path: &str) -> error::Result<()> {
    debug!(path, "running script file");

    let result = interpreter.process_source_file(path);

    if let Err(error) = &result {
        interpreter.report(error)?;
    }

    interpreter.output().flush()?;
    result
}

/// Read lines from the user until `bye`, end of input or an interrupt.  Every line is compiled and
/// run on its own, so a definition has to be finished on the line that starts it.
fn repl(interpreter: &mut ForthInterpreter) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("ok> ") {
            Ok(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                let _ = editor.add_history_entry(input);

                if input.eq_ignore_ascii_case("bye") {
                    break;
                }

                // An aborted line has already been reported, the session carries on.
                let _ = interpreter.interpret(REPL_PATH, input);
            }

            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,

            Err(error) => return Err(error),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let Args {
        files,
        eval,
        interactive,
        trace_filter,
    } = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(trace_filter)
        .init();

    let mut interpreter = ForthInterpreter::new();

    if let Err(error) = register_builtin_words(&mut interpreter) {
        eprintln!("Could not register the built-in words: {}", error);
        return ExitCode::FAILURE;
    }

    let mut failed = false;

    for path in &files {
        failed |= run_file(&mut interpreter, path).is_err();
    }

    for line in &eval {
        failed |= interpreter.interpret(EVAL_PATH, line).is_err();
    }

    if interactive || (files.is_empty() && eval.is_empty()) {
        if let Err(error) = repl(&mut interpreter) {
            eprintln!("Input error: {}", error);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
