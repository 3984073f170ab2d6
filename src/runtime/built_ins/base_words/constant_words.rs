use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error,
        interpreter::Interpreter,
    },
};

/// Register some useful constant words.
pub fn register_constant_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(
        interpreter,
        "true",
        0 => 1,
        |_: &mut dyn Interpreter, _: &[Value]| -> error::Result<Vec<Value>> {
            Ok(vec![true.to_value()])
        },
        "Push the value true, -1, onto the data stack."
    )?;

    add_native_word!(
        interpreter,
        "false",
        0 => 1,
        |_: &mut dyn Interpreter, _: &[Value]| -> error::Result<Vec<Value>> {
            Ok(vec![false.to_value()])
        },
        "Push the value false, 0, onto the data stack."
    )
}
