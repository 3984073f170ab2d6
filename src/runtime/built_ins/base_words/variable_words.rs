use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error::{self, script_error, ErrorKind},
        interpreter::Interpreter,
    },
};

/// Check an address cell against the allocated variables.
fn variable_index(interpreter: &dyn Interpreter, address: &Value) -> error::Result<usize> {
    let count = interpreter.variables().len();

    match address {
        Value::Int(index) if *index >= 0 && (*index as usize) < count => Ok(*index as usize),
        _ => script_error(
            interpreter,
            ErrorKind::InvalidAddress,
            format!("Address {} out of range of {} variables.", address, count),
        ),
    }
}

/// Write a value to a variable.
///
/// Signature: `value address -- `
fn word_store(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    let index = variable_index(interpreter, &args[1])?;

    interpreter.variables_mut().store(index, args[0]);
    Ok(Vec::new())
}

/// Read a value from a variable.
///
/// Signature: `address -- value`
fn word_fetch(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    let index = variable_index(interpreter, &args[0])?;

    match interpreter.variables().fetch(index) {
        Some(value) => Ok(vec![value]),
        None => script_error(
            interpreter,
            ErrorKind::InvalidAddress,
            format!("Address {} holds no value.", index),
        ),
    }
}

/// Register the variable access words.
pub fn register_variable_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "!", 2 => 0, word_store, "Write a value to a variable address.")?;
    add_native_word!(interpreter, "@", 1 => 1, word_fetch, "Read the value at a variable address.")
}
