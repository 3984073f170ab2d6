use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error::{self, script_error, ErrorKind},
        interpreter::{Interpreter, InterpreterStack},
    },
};
use std::io::Write;

/// Print the top value followed by a space.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    write!(interpreter.output(), "{} ", args[0])?;
    Ok(Vec::new())
}

/// Print the character for a code point.
///
/// Signature: `code -- `
fn word_emit(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    let character = match args[0] {
        Value::Int(code) => u32::try_from(code).ok().and_then(char::from_u32),
        Value::Float(_) => None,
    };

    let Some(character) = character else {
        return script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Value {} is not a character code.", args[0]),
        );
    };

    write!(interpreter.output(), "{}", character)?;
    Ok(Vec::new())
}

/// Print a new line.
///
/// Signature: ` -- `
fn word_cr(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    writeln!(interpreter.output())?;
    Ok(Vec::new())
}

/// Print the stack depth and contents, deepest first, without changing the stack.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    let contents: Vec<String> = interpreter.stack().iter().map(|value| value.to_string()).collect();
    let line = format!("<{}> {}", contents.len(), contents.join(" "));

    writeln!(interpreter.output(), "{}", line)?;
    Ok(Vec::new())
}

/// Register the words that print to the interpreter's output.
pub fn register_io_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, ".", 1 => 0, word_print, "Print the top value and a space.")?;
    add_native_word!(interpreter, "emit", 1 => 0, word_emit, "Print a character by code point.")?;
    add_native_word!(interpreter, "cr", 0 => 0, word_cr, "Print a new line.")?;
    add_native_word!(interpreter, ".s", 0 => 0, word_print_stack, "Print the stack contents.")
}
