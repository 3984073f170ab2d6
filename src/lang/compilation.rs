use crate::{
    lang::{
        code::{ByteCode, Instruction, LoopStep, Op},
        tokenizing::Token,
    },
    runtime::{
        data_structures::{
            dictionary::{WordInfo, WordKind},
            value::ToValue,
        },
        error::{self, ErrorKind, ScriptError},
        interpreter::Interpreter,
    },
};
use lazy_static::lazy_static;
use std::{collections::HashSet, rc::Rc};
use tracing::debug;

lazy_static! {
    /// Words that only have a meaning inside of a definition.
    static ref COMPILE_ONLY_WORDS: HashSet<&'static str> = [
        "if", "else", "then", "begin", "until", "while", "repeat", "again", "do", "loop", "+loop",
        "recurse", "exit", ";",
    ]
    .into_iter()
    .collect();
}

/// Is the word one of the control keywords that can't be used at the top level?
pub fn is_compile_only(word: &str) -> bool {
    COMPILE_ONLY_WORDS.contains(word)
}

fn malformed(token: &Token, message: String) -> ScriptError {
    ScriptError::new(ErrorKind::MalformedControl, Some(token.location().clone()), message)
}

/// Skip a parenthetical comment.  The ip is expected to be just past the opening `(`, it's left
/// just past the matching `)`.  Comments nest.
pub fn skip_comment(tokens: &[Token], ip: &mut usize, opener: &Token) -> error::Result<()> {
    let mut depth = 1;

    while let Some(token) = tokens.get(*ip) {
        *ip += 1;

        if token.is("(") {
            depth += 1;
        } else if token.is(")") {
            depth -= 1;

            if depth == 0 {
                return Ok(());
            }
        }
    }

    ScriptError::new_as_result(
        ErrorKind::UnmatchedComment,
        Some(opener.location().clone()),
        "Comment '(' is missing the closing ')'.".to_string(),
    )
}

/// Collect the text of a `."` string literal.  Tokens are taken until one ends with a `"`, then
/// joined with single spaces and the closing quote is dropped.  Like every other token the words
/// arrive lower cased.
pub fn collect_string(tokens: &[Token], ip: &mut usize, opener: &Token) -> error::Result<String> {
    let mut words = Vec::new();

    while let Some(token) = tokens.get(*ip) {
        *ip += 1;

        if let Some(last) = token.text().strip_suffix('"') {
            words.push(last);
            return Ok(words.join(" "));
        }

        words.push(token.text());
    }

    ScriptError::new_as_result(
        ErrorKind::UnterminatedString,
        Some(opener.location().clone()),
        "String literal is missing the closing '\"'.".to_string(),
    )
}

/// Builds up the instruction list of one definition body, or of one counted loop body.
///
/// Unresolved branch positions and loop start markers are kept on the interpreter's data stack.
/// Only entries above `base` belong to this body.  The reuse is only sound because a body is
/// compiled in one uninterrupted pass, nothing else touches the stack until the body is closed.
struct CodeConstructor {
    /// The instructions generated so far.
    code: ByteCode,

    /// Positions of branch instructions still waiting for their offset.
    unresolved: HashSet<usize>,

    /// Depth of the data stack when this body was started.
    base: usize,
}

impl CodeConstructor {
    fn new(base: usize) -> CodeConstructor {
        CodeConstructor {
            code: ByteCode::new(),
            unresolved: HashSet::new(),
            base,
        }
    }

    /// The index the next instruction will be written to.
    fn position(&self) -> usize {
        self.code.len()
    }

    fn emit(&mut self, token: &Token, op: Op) {
        self.code
            .push(Instruction::new(Some(token.location().clone()), op));
    }

    /// Emit a branch whose offset isn't known yet and push its position for a later resolve.
    fn emit_placeholder(&mut self, interpreter: &mut dyn Interpreter, token: &Token, op: Op) {
        let position = self.position();

        self.emit(token, op);
        self.unresolved.insert(position);
        interpreter.push(position.to_value());
    }

    /// Pop a backpatch position or loop marker pushed by this body.
    fn pop_entry(
        &self,
        interpreter: &mut dyn Interpreter,
        token: &Token,
        opener: &str,
    ) -> error::Result<usize> {
        if interpreter.stack().len() <= self.base {
            return Err(malformed(
                token,
                format!("'{}' without a matching '{}'.", token, opener),
            ));
        }

        let entry = interpreter.pop()?.get_int_val();

        match usize::try_from(entry) {
            Ok(position) if position <= self.position() => Ok(position),
            _ => Err(malformed(
                token,
                format!("'{}' found a corrupt control entry {}.", token, entry),
            )),
        }
    }

    /// Offset of a branch emitted at the current position that jumps back to the marker.
    fn backward_offset(&self, marker: usize) -> isize {
        marker as isize - self.position() as isize - 1
    }

    /// Point the branch at `position` to the current end of the code.  The offset is relative to
    /// the instruction following the branch, so the taken branch lands on whatever gets compiled
    /// next.
    fn resolve(
        &mut self,
        token: &Token,
        position: usize,
        opener: &str,
        conditional_only: bool,
    ) -> error::Result<()> {
        let conditional = matches!(
            self.code.get(position).map(|instruction| &instruction.op),
            Some(Op::JumpIfZero(..))
        );

        if (conditional_only && !conditional) || !self.unresolved.remove(&position) {
            return Err(malformed(
                token,
                format!("'{}' without a matching '{}'.", token, opener),
            ));
        }

        let jump = self.position() as isize - position as isize - 1;

        if let Op::Jump(offset) | Op::JumpIfZero(offset, _) = &mut self.code[position].op {
            *offset = jump;
        }

        debug!(position, jump, "'{}' resolved branch", token);
        Ok(())
    }

    /// Translate one token of the body.
    fn compile_token(
        &mut self,
        interpreter: &mut dyn Interpreter,
        tokens: &[Token],
        ip: &mut usize,
        token: &Token,
    ) -> error::Result<()> {
        match token.text() {
            "(" => skip_comment(tokens, ip, token)?,

            ".\"" => {
                let text = collect_string(tokens, ip, token)?;
                self.emit(token, Op::PrintString(text));
            }

            ":" => {
                return Err(malformed(
                    token,
                    "Definitions can not be nested.".to_string(),
                ));
            }

            "if" => self.emit_placeholder(interpreter, token, Op::JumpIfZero(0, "if")),

            "then" => {
                let position = self.pop_entry(interpreter, token, "if")?;
                self.resolve(token, position, "if", false)?;
            }

            "else" => {
                let position = self.pop_entry(interpreter, token, "if")?;

                self.emit_placeholder(interpreter, token, Op::Jump(0));
                self.resolve(token, position, "if", true)?;
            }

            "begin" => interpreter.push(self.position().to_value()),

            "until" => {
                let marker = self.pop_entry(interpreter, token, "begin")?;
                let jump = self.backward_offset(marker);

                self.emit(token, Op::JumpIfZero(jump, "until"));
            }

            "while" => {
                let marker = self.pop_entry(interpreter, token, "begin")?;

                self.emit_placeholder(interpreter, token, Op::JumpIfZero(0, "while"));
                interpreter.push(marker.to_value());
            }

            "repeat" => {
                let marker = self.pop_entry(interpreter, token, "begin")?;
                let jump = self.backward_offset(marker);

                self.emit(token, Op::Jump(jump));

                let exit = self.pop_entry(interpreter, token, "while")?;
                self.resolve(token, exit, "while", true)?;
            }

            "again" => {
                let marker = self.pop_entry(interpreter, token, "begin")?;
                let jump = self.backward_offset(marker);

                self.emit(token, Op::Jump(jump));
            }

            "do" => {
                let (body, closer) = compile_body(interpreter, tokens, ip, token, &["loop", "+loop"])?;
                let step = if closer.is("+loop") {
                    LoopStep::Popped
                } else {
                    LoopStep::One
                };

                self.emit(token, Op::CountedLoop(Rc::new(body), step));
            }

            "loop" | "+loop" => {
                return Err(malformed(
                    token,
                    format!("'{}' without a matching 'do'.", token),
                ));
            }

            ";" => {
                return Err(malformed(
                    token,
                    "Definition ended inside of a 'do' loop.".to_string(),
                ));
            }

            _ => self.emit(token, Op::Execute(token.clone())),
        }

        Ok(())
    }

    /// Make sure every construct opened in this body was closed and hand back the code.
    fn finish(self, interpreter: &dyn Interpreter, closer: &Token) -> error::Result<ByteCode> {
        if interpreter.stack().len() != self.base || !self.unresolved.is_empty() {
            return Err(malformed(
                closer,
                format!("'{}' reached with an unclosed control structure.", closer),
            ));
        }

        Ok(self.code)
    }
}

/// Compile tokens until one of the closers is found, returning the code and the closer.
fn compile_body(
    interpreter: &mut dyn Interpreter,
    tokens: &[Token],
    ip: &mut usize,
    opener: &Token,
    closers: &[&str],
) -> error::Result<(ByteCode, Token)> {
    let mut constructor = CodeConstructor::new(interpreter.stack().len());

    while let Some(token) = tokens.get(*ip) {
        *ip += 1;

        if closers.contains(&token.text()) {
            let code = constructor.finish(interpreter, token)?;
            return Ok((code, token.clone()));
        }

        constructor.compile_token(interpreter, tokens, ip, token)?;
    }

    Err(malformed(
        opener,
        format!("'{}' is missing its closing '{}'.", opener, closers.join("' or '")),
    ))
}

/// Compile a word definition.  The ip is expected to be just past the `:`, it's left just past the
/// closing `;`.  The new word only becomes visible once its whole body compiled with every branch
/// resolved.  On failure the dictionary is untouched and the data stack is restored to the depth it
/// had before the definition.
pub fn compile_definition(
    interpreter: &mut dyn Interpreter,
    tokens: &[Token],
    ip: &mut usize,
    opener: &Token,
) -> error::Result<()> {
    let name = match tokens.get(*ip) {
        Some(name) if !name.is(":") && !name.is(";") => name,
        _ => {
            return Err(malformed(
                opener,
                "Definition is missing a name.".to_string(),
            ));
        }
    };

    *ip += 1;

    let base = interpreter.stack().len();

    match compile_body(interpreter, tokens, ip, opener, &[";"]) {
        Ok((code, _)) => {
            debug!(word = name.text(), instructions = code.len(), "compiled definition");

            let info = WordInfo::new(
                name.location().clone(),
                name.text(),
                WordKind::Compiled(Rc::new(code)),
                format!("Defined at {}.", name.location()),
            );

            interpreter.add_word(info)
        }

        Err(error) => {
            interpreter.truncate_stack(base);
            Err(error)
        }
    }
}
