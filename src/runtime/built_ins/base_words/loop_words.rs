use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, script_error, ErrorKind},
        interpreter::{Interpreter, LoopManagement},
    },
};

/// Push the index of the counted loop `depth` levels out from the innermost one.
fn loop_index(interpreter: &dyn Interpreter, name: &str, depth: usize) -> error::Result<Vec<Value>> {
    match interpreter.loop_index(depth) {
        Some(index) => Ok(vec![index.to_value()]),
        None => script_error(
            interpreter,
            ErrorKind::CompileOnly,
            format!(
                "'{}' needs {} running counted loop(s), found {}.",
                name,
                depth + 1,
                interpreter.loop_depth()
            ),
        ),
    }
}

/// Signature: ` -- index`
fn word_i(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    loop_index(interpreter, "i", 0)
}

/// Signature: ` -- outer-index`
fn word_j(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    loop_index(interpreter, "j", 1)
}

/// Register the counted loop index words.
pub fn register_loop_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "i", 0 => 1, word_i, "Index of the innermost counted loop.")?;
    add_native_word!(interpreter, "j", 0 => 1, word_j, "Index of the next outer counted loop.")
}
