use crate::{
    lang::{code::ByteCode, source_location::SourceLocation},
    runtime::{data_structures::value::Value, interpreter::WordHandler},
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A word implemented in Rust.  The arity is part of the word's contract: the executor checks the
/// stack depth against it, pops exactly that many cells and hands them to the handler in stack
/// order, deepest first.  The handler's results are pushed back in order.
#[derive(Clone)]
pub struct NativeWord {
    /// How many cells the word consumes.
    pub arity: usize,

    /// How many cells the word produces.
    pub results: usize,

    /// The function that does the work.
    pub handler: Rc<WordHandler>,
}

/// What a dictionary name is bound to.
#[derive(Clone)]
pub enum WordKind {
    /// A word written in Rust.
    Native(NativeWord),

    /// A word compiled from a `: name ... ;` definition.  The code is immutable once installed, a
    /// redefinition replaces the whole entry.
    Compiled(Rc<ByteCode>),

    /// The index of a cell in the variable list.
    Variable(usize),

    /// A value bound once when the constant was defined.
    Constant(Value),
}

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct WordInfo {
    /// The location in the source code where the word was defined.
    pub location: SourceLocation,

    /// The name of the word, always lower case.
    pub name: String,

    /// What the name is bound to.
    pub kind: WordKind,

    /// A simple description of the word.
    pub description: String,
}

impl WordInfo {
    /// Create a new WordInfo, the name is normalized to lower case.
    pub fn new(location: SourceLocation, name: &str, kind: WordKind, description: String) -> WordInfo {
        WordInfo {
            location,
            name: name.to_lowercase(),
            kind,
            description,
        }
    }

    /// A short tag for the word's kind, used in word listings.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            WordKind::Native(_) => "native",
            WordKind::Compiled(_) => "compiled",
            WordKind::Variable(_) => "variable",
            WordKind::Constant(_) => "constant",
        }
    }
}

/// The dictionary used by the interpreter.  Names are case-insensitive, every lookup and insert
/// normalizes to lower case first.
#[derive(Default)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the dictionary, sorted by name.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);
        let mut keys: Vec<&String> = self.words.keys().collect();

        keys.sort();

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        for key in keys {
            let word = &self.words[key];

            writeln!(
                formatter,
                "{:width$}  {:8}  --  {}",
                key,
                word.kind_name(),
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word, replacing any previous binding of the same name.  The replaced entry is
    /// returned so that the caller can report the redefinition.
    pub fn insert(&mut self, info: WordInfo) -> Option<WordInfo> {
        self.words.insert(info.name.clone(), info)
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(&name.to_lowercase())
    }

    /// Is the name bound to anything?
    pub fn contains(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    /// How many words are defined.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Is the dictionary empty?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
