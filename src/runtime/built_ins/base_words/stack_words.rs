use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error,
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[0], args[0]])
}

/// Duplicate the top 2 values on the data stack.
///
/// Signature: `a b -- a b a b`
fn word_2dup(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[0], args[1], args[0], args[1]])
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(_: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    Ok(Vec::new())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[1], args[0]])
}

/// Rotate the third value up to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[1], args[2], args[0]])
}

/// Make a copy of the second value and place the copy on top.
///
/// Signature: `a b -- a b a`
fn word_over(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[0], args[1], args[0]])
}

/// Get the depth of the data stack before calling this word.
///
/// Signature: ` -- depth`
fn word_stack_depth(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![interpreter.stack().len().to_value()])
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "dup", 1 => 2, word_dup, "Duplicate the top value on the stack.")?;
    add_native_word!(interpreter, "2dup", 2 => 4, word_2dup, "Duplicate the top two values.")?;
    add_native_word!(interpreter, "drop", 1 => 0, word_drop, "Discard the top value.")?;
    add_native_word!(interpreter, "2drop", 2 => 0, word_drop, "Discard the top two values.")?;
    add_native_word!(interpreter, "swap", 2 => 2, word_swap, "Swap the top two values.")?;
    add_native_word!(interpreter, "rot", 3 => 3, word_rot, "Rotate the third value to the top.")?;
    add_native_word!(interpreter, "over", 2 => 3, word_over, "Copy the second value over the top.")?;
    add_native_word!(
        interpreter,
        "depth",
        0 => 1,
        word_stack_depth,
        "Push the depth of the stack."
    )
}
