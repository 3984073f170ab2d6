use crate::lang::{source_location::SourceLocation, tokenizing::Token};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// How a counted loop advances its index after each pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStep {
    /// `do ... loop`, the index is incremented by one.
    One,

    /// `do ... +loop`, the step is popped from the data stack after each pass.
    Popped,
}

/// The operations that can be performed by the virtual machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// Execute a token at run time.  The token can name a native word, a compiled word, a variable
    /// or constant, one of the run time control words (`exit`, `recurse`, `variable`, `constant`)
    /// or be a numeric literal.  Nothing is resolved at compile time, which is what allows words to
    /// refer to words that are not yet defined, including themselves.
    Execute(Token),

    /// Jump to a new instruction.  The value is the offset relative to the instruction following
    /// this one.
    Jump(isize),

    /// Pop the top of the stack and jump if it is zero.  The value is the offset relative to the
    /// instruction following this one.  A nonzero value falls through.  The keyword that compiled
    /// the branch is kept for underflow diagnostics.
    JumpIfZero(isize, &'static str),

    /// Run the body repeatedly under the control of the loop index and limit popped when the
    /// instruction executes.  The body is its own instruction sequence, branch offsets inside of it
    /// are relative to that sequence.
    CountedLoop(Rc<ByteCode>, LoopStep),

    /// Print a string literal collected by `."`.
    PrintString(String),
}

/// Represents a single instruction in the virtual machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    /// Location in the source code this instruction was generated from.
    pub location: Option<SourceLocation>,

    /// The operation to perform and optionally it's value as defined by the Op enum.
    pub op: Op,
}

/// Allow for pretty printing of the instruction and it's value.
impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.op {
            Op::Execute(token) => write!(f, "Execute           {}", token),
            Op::Jump(offset) => write!(f, "Jump              {}", offset),
            Op::JumpIfZero(offset, _) => write!(f, "JumpIfZero        {}", offset),
            Op::CountedLoop(body, LoopStep::One) => {
                write!(f, "CountedLoop       {} instructions, step 1", body.len())
            }
            Op::CountedLoop(body, LoopStep::Popped) => {
                write!(f, "CountedLoop       {} instructions, step popped", body.len())
            }
            Op::PrintString(text) => write!(f, "PrintString       {:?}", text),
        }
    }
}

/// A collection of instructions that make up a compiled word's body.
pub type ByteCode = Vec<Instruction>;

impl Instruction {
    /// Create a new instruction with a location and operation.
    pub fn new(location: Option<SourceLocation>, op: Op) -> Instruction {
        Instruction { location, op }
    }
}

/// Pretty print the byte code for debugging purposes.  Counted loop bodies are listed indented
/// under the instruction that owns them.
pub fn pretty_print_code(code: &ByteCode) -> String {
    fn print_level(result: &mut String, code: &ByteCode, depth: usize) {
        use std::fmt::Write;

        for (index, instruction) in code.iter().enumerate() {
            writeln!(result, "{:indent$}{:4}: {}", "", index, instruction, indent = depth * 6)
                .expect("Writing to String should never fail.");

            if let Op::CountedLoop(body, _) = &instruction.op {
                print_level(result, body, depth + 1);
            }
        }
    }

    let mut result = String::with_capacity(code.len() * 20);

    print_level(&mut result, code, 0);
    result
}
