/// Words that manipulate the data stack.
mod stack_words;

/// Simple constants.
mod constant_words;

/// Arithmetic on integers and floats.
mod simple_arithmetic_words;

/// Words that work with comparisons and bit manipulation.
mod math_logic_and_bit_words;

/// Reading and writing variables.
mod variable_words;

/// The counted loop index words.
mod loop_words;

/// Words that work with words.
mod word_words;

use crate::runtime::{
    built_ins::base_words::{
        constant_words::register_constant_words, loop_words::register_loop_words,
        math_logic_and_bit_words::register_math_logic_and_bit_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words, variable_words::register_variable_words,
        word_words::register_word_words,
    },
    error,
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_stack_words(interpreter)?;
    register_constant_words(interpreter)?;
    register_simple_arithmetic_words(interpreter)?;
    register_math_logic_and_bit_words(interpreter)?;
    register_variable_words(interpreter)?;
    register_loop_words(interpreter)?;
    register_word_words(interpreter)
}
