use crate::{
    lang::{code::ByteCode, source_location::SourceLocation, tokenizing::Token},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
            variable_list::VariableList,
        },
        error::{self, ScriptError},
    },
};
use std::{io::Write, rc::Rc};

pub mod forth_interpreter;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// How a token sequence finished executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Ran off the end of the sequence.
    Continue,

    /// Hit `exit`, the rest of the current word is skipped.
    Exit,
}

/// Trait for managing the interpreter's data stack.  The compiler reuses the same stack to hold its
/// backpatch positions while a definition is being compiled.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.  One example is for the stack dump command
    /// `.s`.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value as an integer.  Floats are rejected with a type mismatch error.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Drop everything above the given depth.  Used to unwind the compiler's backpatch entries
    /// after a failed definition.
    fn truncate_stack(&mut self, depth: usize);
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the current executing location in the original source.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// Add a new word to the interpreter's dictionary, fully replacing any previous binding of the
    /// same name.  A replacement is reported as a redefinition, it's not an error.
    fn add_word(&mut self, info: WordInfo) -> error::Result<()>;

    /// Find a word in the interpreter's dictionary by name.
    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    /// Allocate a new variable cell and bind the name to its index.  Fails with a name collision if
    /// the name is already bound.
    fn define_variable(&mut self, name: &Token) -> error::Result<()>;

    /// Pop a value and bind the name to it.  Fails with a name collision if the name is already
    /// bound, in which case the stack is left alone.
    fn define_constant(&mut self, name: &Token) -> error::Result<()>;

    /// Execute a single token: a dictionary word or a numeric literal.
    fn execute_token(&mut self, token: &Token) -> error::Result<()>;
}

/// Trait for turning source text into work: tokenizing, compiling definitions and executing
/// everything else.
pub trait CodeManagement {
    /// Process a list of tokens as top level input.  Definitions are compiled into the dictionary,
    /// everything else is executed as it's found.  Recoverable conditions are reported as they
    /// happen, the first condition that aborts the pass is returned.
    fn process_tokens(&mut self, tokens: &[Token]) -> error::Result<()>;

    /// Tokenize and process an in memory source string.  The path parameter is used to represent
    /// the source code in error reporting, for example the REPL uses "\<repl\>".
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Read, tokenize and process a whole source file.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;

    /// Process source like `process_source`, but also report an aborting error to the output
    /// before handing it back.  This is the entry point for the input front end.
    fn interpret(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Execute a compiled word's body from its first instruction.
    fn execute_code(&mut self, name: &str, code: &Rc<ByteCode>) -> error::Result<()>;
}

/// Trait for the counted loop context stack.
pub trait LoopManagement {
    /// The index of a running counted loop, depth 0 is the innermost loop.
    fn loop_index(&self, depth: usize) -> Option<i64>;

    /// How many counted loops are currently running.
    fn loop_depth(&self) -> usize;
}

/// Definition of a native word handler.  The handler receives exactly as many cells as the word's
/// declared arity, deepest first, and returns the cells to push.
pub type WordHandler = dyn Fn(&mut dyn Interpreter, &[Value]) -> error::Result<Vec<Value>>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The number of cells the word consumes and produces.  The word function handler to
/// execute for the word.  As well as a simple description of the word.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $arity:expr => $results:expr ,
        $function:expr ,
        $description:expr
    ) => {{
        use std::rc::Rc;
        use $crate::runtime::data_structures::dictionary::{NativeWord, WordInfo, WordKind};

        let native = NativeWord {
            arity: $arity,
            results: $results,
            handler: Rc::new($function),
        };

        // Record where in the Rust source the word was registered from.
        let info = WordInfo::new(
            $crate::location_here!(),
            $name,
            WordKind::Native(native),
            $description.to_string(),
        );

        $interpreter.add_word(info)
    }};
}

/// Core interpreter trait.
///
/// This trait brings together the traits that define the core functionality of the interpreter.
/// Managing the data stack, managing and executing words, processing source, and the counted loop
/// contexts.  Native words see the interpreter only through this trait.
pub trait Interpreter: InterpreterStack + WordManagement + CodeManagement + LoopManagement {
    /// The current list of variables known to the interpreter.
    fn variables(&self) -> &VariableList;

    /// Mutable access to the variables, for `!`.
    fn variables_mut(&mut self) -> &mut VariableList;

    /// Where printing words send their text.
    fn output(&mut self) -> &mut dyn Write;

    /// Write a diagnostic for the given condition to the output, and log it.
    fn report(&mut self, error: &ScriptError) -> error::Result<()>;

    /// Clear the data stack and any counted loop state.  The dictionary and variables are kept.
    fn reset(&mut self);
}
