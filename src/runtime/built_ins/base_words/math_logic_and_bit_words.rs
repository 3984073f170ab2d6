use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, script_error, ErrorKind},
        interpreter::Interpreter,
    },
};

/// Helper function to handle the comparison words.  The result is a Forth flag, -1 for true and 0
/// for false.
fn compare_op(args: &[Value], cop: fn(&Value, &Value) -> bool) -> Vec<Value> {
    vec![cop(&args[0], &args[1]).to_value()]
}

/// Helper function to handle bit manipulation operations.  Only integers carry bits, a float
/// operand is a type mismatch.
fn bit_op(
    interpreter: &mut dyn Interpreter,
    args: &[Value],
    iop: fn(i64, i64) -> i64,
) -> error::Result<Vec<Value>> {
    match (args[0], args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(vec![iop(a, b).to_value()]),
        (a, b) => script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Bitwise operation needs integers, found {} and {}.", a, b),
        ),
    }
}

/// Shift counts wrap to the width of the cell.
fn shift_count(count: i64) -> u32 {
    (count & 63) as u32
}

fn word_equal(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(compare_op(args, |a, b| a == b))
}

fn word_less_than(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(compare_op(args, |a, b| a < b))
}

fn word_greater_than(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(compare_op(args, |a, b| a > b))
}

fn word_zero_equal(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(vec![args[0].is_zero().to_value()])
}

fn word_and(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    bit_op(interpreter, args, |a, b| a & b)
}

fn word_or(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    bit_op(interpreter, args, |a, b| a | b)
}

fn word_xor(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    bit_op(interpreter, args, |a, b| a ^ b)
}

fn word_left_shift(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    bit_op(interpreter, args, |a, b| a.wrapping_shl(shift_count(b)))
}

/// A logical shift, zeros come in from the top.
fn word_right_shift(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    bit_op(interpreter, args, |a, b| ((a as u64) >> shift_count(b)) as i64)
}

fn word_invert(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    match args[0] {
        Value::Int(value) => Ok(vec![(!value).to_value()]),
        value => script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Bitwise operation needs an integer, found {}.", value),
        ),
    }
}

/// Register the comparison and bit manipulation words.
pub fn register_math_logic_and_bit_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "=", 2 => 1, word_equal, "( a b -- flag ) Are a and b equal?")?;
    add_native_word!(interpreter, "<", 2 => 1, word_less_than, "( a b -- flag ) Is a less than b?")?;
    add_native_word!(
        interpreter,
        ">",
        2 => 1,
        word_greater_than,
        "( a b -- flag ) Is a greater than b?"
    )?;
    add_native_word!(interpreter, "0=", 1 => 1, word_zero_equal, "( n -- flag ) Is n zero?")?;

    add_native_word!(interpreter, "and", 2 => 1, word_and, "( a b -- n ) Bitwise and.")?;
    add_native_word!(interpreter, "or", 2 => 1, word_or, "( a b -- n ) Bitwise or.")?;
    add_native_word!(interpreter, "xor", 2 => 1, word_xor, "( a b -- n ) Bitwise exclusive or.")?;
    add_native_word!(interpreter, "invert", 1 => 1, word_invert, "( n -- ~n ) Flip every bit.")?;
    add_native_word!(
        interpreter,
        "lshift",
        2 => 1,
        word_left_shift,
        "( n count -- n ) Shift n left by count bits."
    )?;
    add_native_word!(
        interpreter,
        "rshift",
        2 => 1,
        word_right_shift,
        "( n count -- n ) Shift n right by count bits, filling with zeros."
    )
}
