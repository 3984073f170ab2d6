use crate::{
    lang::source_location::SourceLocation,
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Display, Formatter},
    fs::read_to_string,
};

/// The marker that discards the remainder of its physical line.
pub const LINE_COMMENT: &str = "\\";

/// A token is a single whitespace separated unit of the language, normalized to lower case.  Words,
/// numeric literals, control keywords and punctuation markers are all tokens, what a token means is
/// only decided when the compiler or the executor consumes it.
///
/// The token also holds the location in the original source code where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// Tokens print as their text, the location is only shown in diagnostics.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Token {
    /// Create a new token, the text is lower cased here so that every later lookup can assume
    /// normalized names.
    pub fn new(location: SourceLocation, text: &str) -> Token {
        Token {
            location,
            text: text.to_lowercase(),
        }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The normalized text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the token is exactly the given text.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

/// Split one physical line into its whitespace separated pieces, reporting the 1 based column each
/// piece starts at.
fn split_line(line: &str) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (column, (offset, next)) in line.char_indices().enumerate() {
        match (next.is_whitespace(), start) {
            (true, Some((begin, begin_column))) => {
                pieces.push((begin_column + 1, &line[begin..offset]));
                start = None;
            }
            (false, None) => start = Some((offset, column)),
            _ => {}
        }
    }

    if let Some((begin, begin_column)) = start {
        pieces.push((begin_column + 1, &line[begin..]));
    }

    pieces
}

/// Tokenize the source code from a string.  The text is processed line by line, a line comment
/// marker drops itself and everything after it on the same line.  Parenthetical comments are left
/// in the token stream, they're skipped by whoever consumes the tokens.
pub fn tokenize_from_source(path: &str, source: &str) -> TokenList {
    let mut token_list = TokenList::new();

    for (index, line) in source.lines().enumerate() {
        for (column, text) in split_line(line) {
            if text == LINE_COMMENT {
                break;
            }

            let location = SourceLocation::new_from_info(path, index + 1, column);
            token_list.push(Token::new(location, text));
        }
    }

    token_list
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    match read_to_string(path) {
        Ok(source) => Ok(tokenize_from_source(path, &source)),
        Err(error) => ScriptError::new_as_result(
            ErrorKind::Io,
            None,
            format!("Could not read file {}: {}", path, error),
        ),
    }
}
