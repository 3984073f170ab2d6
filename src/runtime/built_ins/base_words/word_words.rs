use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error,
        interpreter::{Interpreter, WordManagement},
    },
};
use std::io::Write;

/// Print every word in the dictionary along with its kind and description.
///
/// Signature: ` -- `
fn word_words(interpreter: &mut dyn Interpreter, _: &[Value]) -> error::Result<Vec<Value>> {
    let listing = interpreter.dictionary().to_string();

    write!(interpreter.output(), "{}", listing)?;
    Ok(Vec::new())
}

/// Register the words that work with words.
pub fn register_word_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "words", 0 => 0, word_words, "List all of the defined words.")
}
