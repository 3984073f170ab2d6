/// Module for tracking where in the original source text a token came from.
pub mod source_location;

/// Module for managing the turning of the source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for defining the instructions a compiled word is made of.
pub mod code;

/// Module for compiling a word definition's tokens into a list of instructions with resolved
/// branch offsets.  The data stack of the interpreter doubles as the compiler's backpatch stack, so
/// this phase requires an active interpreter in order to compile the code.
pub mod compilation;
