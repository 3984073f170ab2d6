use crate::runtime::{error, interpreter::Interpreter};

/// The core words of the language.
pub mod base_words;

/// Words that print to the interpreter's output.
pub mod io_words;

/// Register every native word the language ships with.
pub fn register_builtin_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    base_words::register_base_words(interpreter)?;
    io_words::register_io_words(interpreter)
}
