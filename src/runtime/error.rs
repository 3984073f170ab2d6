use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use crate::lang::source_location::SourceLocation;

use super::interpreter::{ Interpreter, WordManagement };



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The kinds of conditions the interpreter can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind
{
    /// A word needed more cells than the data stack holds.
    StackUnderflow,

    /// A `(` comment was opened but never closed.
    UnmatchedComment,

    /// A token is neither a dictionary word nor a number.
    UnknownWord,

    /// `variable` or `constant` tried to take a name that is already defined.
    NameCollision,

    /// Badly nested control keywords, a nested `:`, or a definition missing its name or `;`.
    MalformedControl,

    /// A word that only has meaning inside of a definition was found at the top level.
    CompileOnly,

    /// A `."` string literal was never closed.
    UnterminatedString,

    /// Integer division or remainder by zero.
    DivisionByZero,

    /// A word that only works on integers was given a floating point cell.
    TypeMismatch,

    /// A fetch or store outside of the allocated variables.
    InvalidAddress,

    /// Compiled words called each other too deeply, usually runaway recursion.
    CallDepthExceeded,

    /// Reading source or writing output failed.
    Io
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let name = match self
        {
            ErrorKind::StackUnderflow     => "stack underflow",
            ErrorKind::UnmatchedComment   => "unmatched comment",
            ErrorKind::UnknownWord        => "unknown word",
            ErrorKind::NameCollision      => "name collision",
            ErrorKind::MalformedControl   => "malformed control structure",
            ErrorKind::CompileOnly        => "compile only word",
            ErrorKind::UnterminatedString => "unterminated string",
            ErrorKind::DivisionByZero     => "division by zero",
            ErrorKind::TypeMismatch       => "type mismatch",
            ErrorKind::InvalidAddress     => "invalid address",
            ErrorKind::CallDepthExceeded  => "call depth exceeded",
            ErrorKind::Io                 => "i/o error"
        };

        write!(f, "{}", name)
    }
}


impl ErrorKind
{
    /// Recoverable conditions are reported and execution carries on with the next token.  Every
    /// other kind aborts the rest of the current input line.
    pub fn is_recoverable(&self) -> bool
    {
        matches!(self, ErrorKind::UnknownWord | ErrorKind::NameCollision | ErrorKind::CompileOnly)
    }
}



/// Any error that occurs during the compilation or execution of a script.
#[derive(Clone, PartialEq)]
pub struct ScriptError
{
    /// What went wrong.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String
}


impl Error for ScriptError
{
}


/// Pretty print the ScriptError for the user.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error),
            None => write!(f, "{}", self.error)
        }
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{:?}: {}", self.kind, self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind, location: Option<SourceLocation>, error: String) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error))
    }

    /// What kind of condition this is.
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// Should execution carry on after reporting this error?
    pub fn is_recoverable(&self) -> bool
    {
        self.kind.is_recoverable()
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error))
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();

    ScriptError::new_as_result(kind, location, message)
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
