use std::{ io::{ stdout, Write },
           rc::Rc };
use tracing::{ debug, info, warn };
use crate::{ lang::{ code::{ pretty_print_code, ByteCode, Instruction, LoopStep, Op },
                     compilation::{ collect_string, compile_definition, is_compile_only, skip_comment },
                     source_location::SourceLocation,
                     tokenizing::{ tokenize_from_file, tokenize_from_source, Token } },
             runtime::{ data_structures::{ dictionary::{ Dictionary, NativeWord, WordInfo, WordKind },
                                           value::{ ToValue, Value },
                                           variable_list::VariableList },
                        error::{ self, script_error, script_error_str, ErrorKind, ScriptError },
                        interpreter::{ CodeManagement,
                                       Flow,
                                       Interpreter,
                                       InterpreterStack,
                                       LoopManagement,
                                       ValueStack,
                                       WordManagement } } };



/// How many compiled words may be active at once before execution is abandoned.
pub const MAX_CALL_DEPTH: usize = 256;



/// The state of one running counted loop.
#[derive(Clone, Copy, Debug)]
struct LoopContext
{
    index: i64,
    limit: i64
}



/// The core interpreter implementation.  All of the session state lives here and is reached by the
/// compiler and the native words through the `Interpreter` trait.
pub struct ForthInterpreter
{
    /// The data stack used by the interpreter.
    stack: ValueStack,


    /// The last known location execution has reached in the original source code.
    current_location: Option<SourceLocation>,


    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,

    /// The list of variables known by the interpreter.
    variables: VariableList,


    /// Running counted loops, innermost last.
    loops: Vec<LoopContext>,

    /// How many compiled words are currently executing.
    call_depth: usize,


    /// Where printed text goes.
    output: Box<dyn Write>
}


impl Interpreter for ForthInterpreter
{
    fn variables(&self) -> &VariableList
    {
        &self.variables
    }

    fn variables_mut(&mut self) -> &mut VariableList
    {
        &mut self.variables
    }

    fn output(&mut self) -> &mut dyn Write
    {
        self.output.as_mut()
    }

    fn report(&mut self, error: &ScriptError) -> error::Result<()>
    {
        warn!(kind = %error.kind(), "{}", error);
        writeln!(self.output, "{}", error)?;

        Ok(())
    }

    fn reset(&mut self)
    {
        self.stack.clear();
        self.loops.clear();
        self.call_depth = 0;
    }
}


impl InterpreterStack for ForthInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow.")
        }
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let value = self.pop()?;

        if !value.is_int()
        {
            return script_error(self,
                                ErrorKind::TypeMismatch,
                                format!("Expected an integer value, found {}.", value));
        }

        Ok(value.get_int_val())
    }

    fn truncate_stack(&mut self, depth: usize)
    {
        self.stack.truncate(depth);
    }
}


impl LoopManagement for ForthInterpreter
{
    fn loop_index(&self, depth: usize) -> Option<i64>
    {
        self.loops.iter().rev().nth(depth).map(|context| context.index)
    }

    fn loop_depth(&self) -> usize
    {
        self.loops.len()
    }
}


// Helper methods for the interpreter instruction handling.
impl ForthInterpreter
{
    fn print_line(&mut self, text: &str) -> error::Result<()>
    {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Recoverable conditions are reported here and swallowed, everything else is handed back to
    /// abort the current line.
    fn handle_error(&mut self, error: ScriptError) -> error::Result<()>
    {
        if error.is_recoverable()
        {
            self.report(&error)
        }
        else
        {
            Err(error)
        }
    }

    /// Fail with an underflow naming the word and showing the stack, unless the stack holds at least
    /// `needed` cells.
    fn require_depth(&self, name: &str, needed: usize) -> error::Result<()>
    {
        if self.stack.len() >= needed
        {
            return Ok(());
        }

        let contents: Vec<String> = self.stack.iter().map(|value| value.to_string()).collect();

        script_error(self,
                     ErrorKind::StackUnderflow,
                     format!("Stack underflow calling {}, needs {}, stack: [{}].",
                             name,
                             needed,
                             contents.join(" ")))
    }

    fn call_native(&mut self, name: &str, native: &NativeWord) -> error::Result<()>
    {
        self.require_depth(name, native.arity)?;

        let arguments = self.stack.split_off(self.stack.len() - native.arity);

        match (native.handler)(self, &arguments)
        {
            Ok(results) =>
                {
                    debug_assert_eq!(results.len(), native.results, "word {} result count", name);

                    for value in results
                    {
                        self.push(value);
                    }

                    Ok(())
                },

            Err(error) =>
                {
                    // Leave the stack the way the word found it.
                    self.stack.extend(arguments);
                    Err(error)
                }
        }
    }

    /// Handle the forms that take the next token as a name, `variable`, `constant` and `see`.
    fn parsing_word(&mut self, word: &Token, name: Option<&Token>) -> error::Result<()>
    {
        let Some(name) = name
        else
        {
            return script_error(self,
                                ErrorKind::MalformedControl,
                                format!("'{}' is missing a name.", word));
        };

        match word.text()
        {
            "variable" => self.define_variable(name),
            "constant" => self.define_constant(name),
            _          => self.see_word(name)
        }
    }

    fn see_word(&mut self, name: &Token) -> error::Result<()>
    {
        let Some(info) = self.dictionary.try_get(name.text()).cloned()
        else
        {
            return script_error(self, ErrorKind::UnknownWord, format!("Unknown word {}.", name));
        };

        match &info.kind
        {
            WordKind::Compiled(code) =>
                {
                    write!(self.output, ": {}\n{};\n", info.name, pretty_print_code(code))?;
                },

            WordKind::Constant(value) =>
                {
                    writeln!(self.output, "{} constant {}", value, info.name)?;
                },

            _ =>
                {
                    writeln!(self.output, "{} is a {} word.  {}",
                             info.name,
                             info.kind_name(),
                             info.description)?;
                }
        }

        Ok(())
    }

    /// Move the pc by a branch offset.  The pc already points past the branch instruction.
    fn branch(&self, pc: &mut usize, offset: isize, length: usize) -> error::Result<()>
    {
        let target = *pc as isize + offset;

        if target < 0 || target as usize > length
        {
            return script_error(self,
                                ErrorKind::MalformedControl,
                                format!("Branch target {} outside of code of length {}.",
                                        target,
                                        length));
        }

        *pc = target as usize;
        Ok(())
    }

    /// Execute one instruction sequence.  `word` is the body of the compiled word being run, `code`
    /// is either that same body or one of its counted loop bodies.
    fn run_code(&mut self, name: &str, word: &Rc<ByteCode>, code: &ByteCode) -> error::Result<Flow>
    {
        let mut pc = 0;

        while pc < code.len()
        {
            let instruction = &code[pc];

            pc += 1;

            if let Some(location) = &instruction.location
            {
                self.current_location = Some(location.clone());
            }

            let result: error::Result<()> =
                match &instruction.op
                {
                    Op::Jump(offset) => self.branch(&mut pc, *offset, code.len()),

                    Op::JumpIfZero(offset, keyword) =>
                        {
                            self.require_depth(keyword, 1)?;

                            if self.pop()?.is_zero()
                            {
                                self.branch(&mut pc, *offset, code.len())
                            }
                            else
                            {
                                Ok(())
                            }
                        },

                    Op::CountedLoop(body, step) =>
                        {
                            if self.counted_loop(name, word, body, *step)? == Flow::Exit
                            {
                                return Ok(Flow::Exit);
                            }

                            Ok(())
                        },

                    Op::PrintString(text) => self.print_line(text),

                    Op::Execute(token) =>
                        {
                            match token.text()
                            {
                                "exit" => return Ok(Flow::Exit),

                                "recurse" => self.execute_code(name, word),

                                "variable" | "constant" | "see" =>
                                    {
                                        let next = match code.get(pc)
                                            {
                                                Some(Instruction { op: Op::Execute(next), .. }) =>
                                                    {
                                                        pc += 1;
                                                        Some(next)
                                                    },

                                                _ => None
                                            };

                                        self.parsing_word(token, next)
                                    },

                                _ => self.execute_token(token)
                            }
                        }
                };

            if let Err(error) = result
            {
                self.handle_error(error)?;
            }
        }

        Ok(Flow::Continue)
    }

    /// Run a counted loop body.  The start index is on top of the stack with the limit under it.
    fn counted_loop(&mut self,
                    name: &str,
                    word: &Rc<ByteCode>,
                    body: &ByteCode,
                    step: LoopStep) -> error::Result<Flow>
    {
        self.require_depth("do", 2)?;

        // Both bounds are checked before either is taken off of the stack.
        let depth = self.stack.len();
        let (limit, index) = match (self.stack[depth - 2], self.stack[depth - 1])
            {
                (Value::Int(limit), Value::Int(index)) => (limit, index),

                (limit, index) =>
                    {
                        return script_error(self,
                                            ErrorKind::TypeMismatch,
                                            format!("'do' needs integer bounds, found {} and {}.",
                                                    limit,
                                                    index));
                    }
            };

        self.stack.truncate(depth - 2);

        // A popped step isn't known until after the first pass.
        let first_pass = match step
            {
                LoopStep::One    => index < limit,
                LoopStep::Popped => index != limit
            };

        if !first_pass
        {
            return Ok(Flow::Continue);
        }

        debug!(index, limit, "entering counted loop");

        self.loops.push(LoopContext { index, limit });

        let result = self.loop_passes(name, word, body, step);

        self.loops.pop();
        result
    }

    fn loop_passes(&mut self,
                   name: &str,
                   word: &Rc<ByteCode>,
                   body: &ByteCode,
                   step: LoopStep) -> error::Result<Flow>
    {
        loop
        {
            if self.run_code(name, word, body)? == Flow::Exit
            {
                return Ok(Flow::Exit);
            }

            let increment = match step
                {
                    LoopStep::One    => 1,
                    LoopStep::Popped =>
                        {
                            self.require_depth("+loop", 1)?;
                            self.pop_as_int()?
                        }
                };

            let finished = match self.loops.last_mut()
                {
                    Some(context) =>
                        {
                            context.index = context.index.wrapping_add(increment);

                            if increment < 0
                            {
                                context.index < context.limit
                            }
                            else
                            {
                                context.index >= context.limit
                            }
                        },

                    None => true
                };

            if finished
            {
                return Ok(Flow::Continue);
            }
        }
    }
}


impl CodeManagement for ForthInterpreter
{
    fn process_tokens(&mut self, tokens: &[Token]) -> error::Result<()>
    {
        let mut ip = 0;

        while ip < tokens.len()
        {
            let token = &tokens[ip];

            ip += 1;
            self.current_location = Some(token.location().clone());

            let result =
                match token.text()
                {
                    "(" => skip_comment(tokens, &mut ip, token),

                    ":" => compile_definition(self, tokens, &mut ip, token),

                    ".\"" =>
                        {
                            collect_string(tokens, &mut ip, token)
                                .and_then(|text| self.print_line(&text))
                        },

                    "variable" | "constant" | "see" =>
                        {
                            let name = tokens.get(ip);

                            if name.is_some()
                            {
                                ip += 1;
                            }

                            self.parsing_word(token, name)
                        },

                    text if is_compile_only(text) =>
                        {
                            script_error(self,
                                         ErrorKind::CompileOnly,
                                         format!("'{}' can only be used inside of a definition.",
                                                 token))
                        },

                    _ => self.execute_token(token)
                };

            if let Err(error) = result
            {
                self.handle_error(error)?;
            }
        }

        Ok(())
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let tokens = tokenize_from_source(path, source);
        self.process_tokens(&tokens)
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let tokens = tokenize_from_file(path)?;
        self.process_tokens(&tokens)
    }

    fn interpret(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let result = self.process_source(path, source);

        if let Err(error) = &result
        {
            self.report(error)?;
        }

        self.output.flush()?;
        result
    }

    fn execute_code(&mut self, name: &str, code: &Rc<ByteCode>) -> error::Result<()>
    {
        if self.call_depth >= MAX_CALL_DEPTH
        {
            return script_error(self,
                                ErrorKind::CallDepthExceeded,
                                format!("Calling {} exceeded the maximum call depth of {}.",
                                        name,
                                        MAX_CALL_DEPTH));
        }

        self.call_depth += 1;

        let result = self.run_code(name, code, code);

        self.call_depth -= 1;
        result.map(|_| ())
    }
}


impl WordManagement for ForthInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn add_word(&mut self, info: WordInfo) -> error::Result<()>
    {
        let name = info.name.clone();

        if self.dictionary.insert(info).is_some()
        {
            info!(word = %name, "redefined word");
            writeln!(self.output, "redefined {}", name)?;
        }

        Ok(())
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(name)
    }

    fn define_variable(&mut self, name: &Token) -> error::Result<()>
    {
        if self.dictionary.contains(name.text())
        {
            return script_error(self,
                                ErrorKind::NameCollision,
                                format!("Variable name {} is already taken.", name));
        }

        let index = self.variables.allocate();
        let info = WordInfo::new(name.location().clone(),
                                 name.text(),
                                 WordKind::Variable(index),
                                 format!("Variable at address {}.", index));

        self.dictionary.insert(info);
        Ok(())
    }

    fn define_constant(&mut self, name: &Token) -> error::Result<()>
    {
        if self.dictionary.contains(name.text())
        {
            return script_error(self,
                                ErrorKind::NameCollision,
                                format!("Constant name {} is already taken.", name));
        }

        self.require_depth("constant", 1)?;

        let value = self.pop()?;
        let info = WordInfo::new(name.location().clone(),
                                 name.text(),
                                 WordKind::Constant(value),
                                 format!("Constant with the value {}.", value));

        self.dictionary.insert(info);
        Ok(())
    }

    fn execute_token(&mut self, token: &Token) -> error::Result<()>
    {
        self.current_location = Some(token.location().clone());

        let kind = self.dictionary.try_get(token.text()).map(|info| info.kind.clone());

        match kind
        {
            Some(WordKind::Native(native)) => self.call_native(token.text(), &native),

            Some(WordKind::Compiled(code)) =>
                {
                    debug!(word = token.text(), "evaluating word");
                    self.execute_code(token.text(), &code)
                },

            Some(WordKind::Variable(index)) =>
                {
                    self.push(index.to_value());
                    Ok(())
                },

            Some(WordKind::Constant(value)) =>
                {
                    self.push(value);
                    Ok(())
                },

            None =>
                {
                    match Value::parse_literal(token.text())
                    {
                        Some(value) =>
                            {
                                self.push(value);
                                Ok(())
                            },

                        None => script_error(self,
                                             ErrorKind::UnknownWord,
                                             format!("Unknown word {}.", token))
                    }
                }
        }
    }
}


impl ForthInterpreter
{
    /// Create an interpreter that prints to stdout.  The dictionary starts out empty, see
    /// `register_builtin_words`.
    pub fn new() -> ForthInterpreter
    {
        ForthInterpreter::with_output(Box::new(stdout()))
    }

    /// Create an interpreter that prints to the given sink.
    pub fn with_output(output: Box<dyn Write>) -> ForthInterpreter
    {
        ForthInterpreter
            {
                stack: Vec::with_capacity(20),

                current_location: None,

                dictionary: Dictionary::new(),
                variables: VariableList::new(),

                loops: Vec::new(),
                call_depth: 0,

                output
            }
    }
}


impl Default for ForthInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
