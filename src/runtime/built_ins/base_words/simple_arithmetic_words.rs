use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{ToValue, Value},
        error::{self, script_error_str, ErrorKind},
        interpreter::Interpreter,
    },
};

/// Helper function to handle binary math operations.  Handlers for int or floating point
/// operations are passed in as arguments, a float on either side promotes the whole operation.
fn math_op(args: &[Value], fop: fn(f64, f64) -> f64, iop: fn(i64, i64) -> i64) -> Vec<Value> {
    let (a, b) = (args[0], args[1]);

    let result = if Value::either_is_float(&a, &b) {
        fop(a.get_float_val(), b.get_float_val()).to_value()
    } else {
        iop(a.get_int_val(), b.get_int_val()).to_value()
    };

    vec![result]
}

/// Same as `math_op` for the single operand words.
fn unary_op(args: &[Value], fop: fn(f64) -> f64, iop: fn(i64) -> i64) -> Vec<Value> {
    let result = match args[0] {
        Value::Int(value) => iop(value).to_value(),
        Value::Float(value) => fop(value).to_value(),
    };

    vec![result]
}

/// Integer division and remainder share the zero divisor check.
fn divide_op(
    interpreter: &mut dyn Interpreter,
    args: &[Value],
    fop: fn(f64, f64) -> f64,
    iop: fn(i64, i64) -> i64,
) -> error::Result<Vec<Value>> {
    let (a, b) = (args[0], args[1]);

    if !Value::either_is_float(&a, &b) && b.is_zero() {
        return script_error_str(interpreter, ErrorKind::DivisionByZero, "Division by zero.");
    }

    Ok(math_op(args, fop, iop))
}

fn word_add(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(math_op(args, |a, b| a + b, i64::wrapping_add))
}

fn word_subtract(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(math_op(args, |a, b| a - b, i64::wrapping_sub))
}

fn word_multiply(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(math_op(args, |a, b| a * b, i64::wrapping_mul))
}

/// Integer division truncates toward zero.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    divide_op(interpreter, args, |a, b| a / b, i64::wrapping_div)
}

/// The remainder takes the sign of the dividend.
///
/// Signature: `a b -- a%b`
fn word_mod(interpreter: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    divide_op(interpreter, args, |a, b| a % b, i64::wrapping_rem)
}

fn word_min(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    let (a, b) = (args[0], args[1]);
    Ok(vec![if b < a { b } else { a }])
}

fn word_max(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    let (a, b) = (args[0], args[1]);
    Ok(vec![if b > a { b } else { a }])
}

fn word_abs(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, f64::abs, i64::wrapping_abs))
}

fn word_negate(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, |a| -a, i64::wrapping_neg))
}

fn word_increment(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, |a| a + 1.0, |a| a.wrapping_add(1)))
}

fn word_decrement(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, |a| a - 1.0, |a| a.wrapping_sub(1)))
}

fn word_double(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, |a| a * 2.0, |a| a.wrapping_shl(1)))
}

/// An arithmetic shift for integers, so odd negative numbers round down.
fn word_halve(_: &mut dyn Interpreter, args: &[Value]) -> error::Result<Vec<Value>> {
    Ok(unary_op(args, |a| a / 2.0, |a| a >> 1))
}

/// Register the arithmetic words.
pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    add_native_word!(interpreter, "+", 2 => 1, word_add, "( a b -- a+b ) Add two numbers.")?;
    add_native_word!(interpreter, "-", 2 => 1, word_subtract, "( a b -- a-b ) Subtract b from a.")?;
    add_native_word!(interpreter, "*", 2 => 1, word_multiply, "( a b -- a*b ) Multiply two numbers.")?;
    add_native_word!(interpreter, "/", 2 => 1, word_divide, "( a b -- a/b ) Divide a by b.")?;
    add_native_word!(
        interpreter,
        "mod",
        2 => 1,
        word_mod,
        "( a b -- r ) Remainder after dividing a by b."
    )?;
    add_native_word!(interpreter, "min", 2 => 1, word_min, "( a b -- n ) The smaller of a and b.")?;
    add_native_word!(interpreter, "max", 2 => 1, word_max, "( a b -- n ) The larger of a and b.")?;
    add_native_word!(interpreter, "abs", 1 => 1, word_abs, "( n -- |n| ) Absolute value.")?;
    add_native_word!(interpreter, "negate", 1 => 1, word_negate, "( n -- -n ) Negate a number.")?;
    add_native_word!(interpreter, "1+", 1 => 1, word_increment, "( n -- n+1 ) Add one.")?;
    add_native_word!(interpreter, "1-", 1 => 1, word_decrement, "( n -- n-1 ) Subtract one.")?;
    add_native_word!(interpreter, "2*", 1 => 1, word_double, "( n -- n*2 ) Multiply by two.")?;
    add_native_word!(interpreter, "2/", 1 => 1, word_halve, "( n -- n/2 ) Divide by two.")
}
