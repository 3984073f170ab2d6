// Parameterized tests for the native word library using test-case.

use snakeforth::runtime::built_ins::register_builtin_words;
use snakeforth::runtime::data_structures::output::CapturedOutput;
use snakeforth::runtime::data_structures::value::Value;
use snakeforth::runtime::error::{ErrorKind, Result};
use snakeforth::runtime::interpreter::forth_interpreter::ForthInterpreter;
use snakeforth::runtime::interpreter::{CodeManagement, InterpreterStack};
use test_case::test_case;

fn new_interpreter() -> (ForthInterpreter, CapturedOutput) {
    let output = CapturedOutput::new();
    let mut interp = ForthInterpreter::with_output(Box::new(output.clone()));

    register_builtin_words(&mut interp).unwrap();
    (interp, output)
}

fn eval_and_stack(word: &str, init_stack: &[i64]) -> Result<Vec<i64>> {
    let (mut interp, _) = new_interpreter();

    for &v in init_stack {
        interp.push(Value::from(v));
    }

    interp.process_source("<test>", word)?;
    let stack = interp.stack().iter().map(|v| v.get_int_val()).collect();
    Ok(stack)
}

#[test_case("0", &[], &[0]; "zero")]
#[test_case("42", &[], &[42]; "number")]
#[test_case("-7", &[], &[-7]; "negative number")]
#[test_case("true", &[], &[-1]; "true word")]
#[test_case("false", &[], &[0]; "false word")]
#[test_case("+", &[2, 2], &[4]; "simple add")]
#[test_case("-", &[5, 2], &[3]; "simple sub")]
#[test_case("*", &[3, 4], &[12]; "simple mul")]
#[test_case("/", &[12, 3], &[4]; "simple div")]
#[test_case("/", &[-7, 2], &[-3]; "div truncates toward zero")]
#[test_case("mod", &[13, 5], &[3]; "simple mod")]
#[test_case("mod", &[-7, 2], &[-1]; "mod takes the sign of the dividend")]
#[test_case("min", &[3, 7], &[3]; "min")]
#[test_case("max", &[3, 7], &[7]; "max")]
#[test_case("abs", &[-42], &[42]; "abs of negative number")]
#[test_case("abs", &[9], &[9]; "abs of positive number")]
#[test_case("negate", &[42], &[-42]; "negate")]
#[test_case("1+", &[41], &[42]; "add one")]
#[test_case("1-", &[43], &[42]; "sub one")]
#[test_case("2*", &[7], &[14]; "times two")]
#[test_case("2/", &[8], &[4]; "divide by two")]
#[test_case("2/", &[-7], &[-4]; "divide by two rounds down")]
#[test_case("9223372036854775807 1 +", &[], &[i64::MIN]; "add wraps")]
fn arithmetic(word: &str, init: &[i64], expected: &[i64]) {
    assert_eq!(eval_and_stack(word, init).unwrap(), expected);
}

#[test_case("dup", &[1], &[1, 1]; "dup")]
#[test_case("2dup", &[1, 2], &[1, 2, 1, 2]; "two dup")]
#[test_case("drop", &[1, 2], &[1]; "drop")]
#[test_case("2drop", &[1, 2, 3], &[1]; "two drop")]
#[test_case("swap", &[1, 2], &[2, 1]; "swap")]
#[test_case("rot", &[1, 2, 3], &[2, 3, 1]; "rot")]
#[test_case("over", &[1, 2], &[1, 2, 1]; "over")]
#[test_case("depth", &[5, 6], &[5, 6, 2]; "depth")]
#[test_case("depth", &[], &[0]; "depth of empty stack")]
fn stack_words(word: &str, init: &[i64], expected: &[i64]) {
    assert_eq!(eval_and_stack(word, init).unwrap(), expected);
}

#[test_case("=", &[5, 5], &[-1]; "equal")]
#[test_case("=", &[5, 6], &[0]; "not equal")]
#[test_case("<", &[1, 2], &[-1]; "less is true")]
#[test_case("<", &[2, 1], &[0]; "less is false")]
#[test_case("<", &[1, 1], &[0]; "less for equal")]
#[test_case(">", &[2, 1], &[-1]; "greater is true")]
#[test_case(">", &[1, 2], &[0]; "greater is false")]
#[test_case("0=", &[0], &[-1]; "zero equal")]
#[test_case("0=", &[5], &[0]; "zero equal for non-zero")]
#[test_case("and", &[6, 3], &[2]; "and")]
#[test_case("or", &[6, 3], &[7]; "or")]
#[test_case("xor", &[6, 3], &[5]; "xor")]
#[test_case("invert", &[0], &[-1]; "invert false")]
#[test_case("invert", &[1], &[-2]; "invert number")]
#[test_case("lshift", &[1, 4], &[16]; "left shift")]
#[test_case("rshift", &[16, 2], &[4]; "right shift")]
#[test_case("rshift", &[-1, 60], &[15]; "right shift is logical")]
fn logic_and_bit_words(word: &str, init: &[i64], expected: &[i64]) {
    assert_eq!(eval_and_stack(word, init).unwrap(), expected);
}

#[test_case("1.5 2 +", Value::Float(3.5); "float add promotes")]
#[test_case("7 2.0 /", Value::Float(3.5); "float division")]
#[test_case("1.0 0 /", Value::Float(f64::INFINITY); "float division by zero")]
#[test_case("-2.5 abs", Value::Float(2.5); "float abs")]
#[test_case("2.5 1+", Value::Float(3.5); "float increment")]
#[test_case("1.5 2 max", Value::Int(2); "max keeps the integer")]
#[test_case("1e3", Value::Float(1000.0); "exponent literal")]
fn float_words(source: &str, expected: Value) {
    let (mut interp, _) = new_interpreter();

    interp.process_source("<test>", source).unwrap();

    let top = *interp.stack().last().unwrap();
    assert_eq!(top, expected);
    assert_eq!(top.is_float(), expected.is_float());
}

#[test_case("drop", ErrorKind::StackUnderflow; "drop on empty stack")]
#[test_case("1 +", ErrorKind::StackUnderflow; "add with one value")]
#[test_case("1 0 /", ErrorKind::DivisionByZero; "integer division by zero")]
#[test_case("1 0 mod", ErrorKind::DivisionByZero; "integer mod by zero")]
#[test_case("1.5 1 and", ErrorKind::TypeMismatch; "bitwise and on float")]
#[test_case("1.5 invert", ErrorKind::TypeMismatch; "invert on float")]
#[test_case("-1 emit", ErrorKind::TypeMismatch; "emit of a bad code point")]
#[test_case("99 @", ErrorKind::InvalidAddress; "fetch from unallocated address")]
#[test_case("1 99 !", ErrorKind::InvalidAddress; "store to unallocated address")]
#[test_case("( never closed", ErrorKind::UnmatchedComment; "unmatched comment")]
#[test_case(".\" never closed", ErrorKind::UnterminatedString; "unterminated string")]
#[test_case(": broken then ;", ErrorKind::MalformedControl; "then without if")]
#[test_case("5 constant", ErrorKind::MalformedControl; "constant without a name")]
fn aborting_errors(source: &str, kind: ErrorKind) {
    let (mut interp, _) = new_interpreter();
    let error = interp.process_source("<test>", source).unwrap_err();

    assert_eq!(error.kind(), kind);
    assert!(!error.is_recoverable());
}

#[test_case("frobnicate", "Unknown word frobnicate."; "unknown word")]
#[test_case("if", "'if' can only be used inside of a definition."; "if at top level")]
#[test_case("exit", "'exit' can only be used inside of a definition."; "exit at top level")]
#[test_case("i", "'i' needs 1 running counted loop(s), found 0."; "loop index outside of a loop")]
#[test_case("variable dup", "Variable name dup is already taken."; "variable shadowing a native")]
fn recoverable_errors(source: &str, message: &str) {
    let (mut interp, output) = new_interpreter();

    interp.process_source("<test>", &format!("{} 7", source)).unwrap();

    assert!(output.contents().contains(message), "output was: {}", output.contents());
    assert_eq!(interp.stack().last(), Some(&Value::Int(7)));
}
