/// Module contains the Value enumeration and it's implementation.  The value is the cell type held
/// by the data stack and the variable store.
pub mod value;

/// The dictionary module provides the word dictionary used by the interpreter.
pub mod dictionary;

/// The append-only variable store backing `variable`, `@` and `!`.
pub mod variable_list;

/// Output sinks the interpreter can print to.
pub mod output;
