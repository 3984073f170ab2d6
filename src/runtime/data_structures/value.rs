use std::{ cmp::Ordering,
           fmt::{ self, Display, Formatter } };



/// A single cell of the data stack or of the variable store.  The stack is untyped with respect to
/// the cell kind, each word decides for itself how to treat integers and floats.
#[derive(Clone, Copy, Debug)]
pub enum Value
{
    /// A 64-bit signed integer.
    Int(i64),

    /// A 64-bit floating point number.
    Float(f64)
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}


impl ToValue for i64
{
    fn to_value(&self) -> Value
    {
        Value::Int(*self)
    }
}


impl ToValue for f64
{
    fn to_value(&self) -> Value
    {
        Value::Float(*self)
    }
}


/// Positions and depths are pushed as integers.
impl ToValue for usize
{
    fn to_value(&self) -> Value
    {
        Value::Int(*self as i64)
    }
}


/// Forth flags, true is all bits set and false is zero.
impl ToValue for bool
{
    fn to_value(&self) -> Value
    {
        Value::Int(if *self { -1 } else { 0 })
    }
}


impl From<i64> for Value
{
    fn from(original: i64) -> Value
    {
        original.to_value()
    }
}


impl From<f64> for Value
{
    fn from(original: f64) -> Value
    {
        original.to_value()
    }
}


impl Default for Value
{
    fn default() -> Value
    {
        Value::Int(0)
    }
}


/// Integers and floats compare by value, an integer is promoted when compared against a float.
impl PartialEq for Value
{
    fn eq(&self, other: &Value) -> bool
    {
        match ( self, other )
        {
            ( Value::Int(a), Value::Int(b) ) => a == b,
            _                                => self.get_float_val() == other.get_float_val()
        }
    }
}


impl PartialOrd for Value
{
    fn partial_cmp(&self, other: &Value) -> Option<Ordering>
    {
        match ( self, other )
        {
            ( Value::Int(a), Value::Int(b) ) => a.partial_cmp(b),
            _                                => self.get_float_val().partial_cmp(&other.get_float_val())
        }
    }
}


/// Floats always show a decimal point so that they can be told apart from integers on the stack.
impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Int(value)   => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value)
        }
    }
}


impl Value
{
    /// Attempt to read a numeric literal, first as an integer and then as a floating point number.
    /// Text without any digits is never a number, so words like `inf` or `nan` stay words.
    pub fn parse_literal(text: &str) -> Option<Value>
    {
        if let Ok(value) = text.parse::<i64>()
        {
            return Some(Value::Int(value));
        }

        if !text.chars().any(|next| next.is_ascii_digit())
        {
            return None;
        }

        text.parse::<f64>().ok().map(Value::Float)
    }

    /// Is the value held as an integer?
    pub fn is_int(&self) -> bool
    {
        matches!(self, Value::Int(_))
    }

    /// Is the value held as a floating point number?
    pub fn is_float(&self) -> bool
    {
        matches!(self, Value::Float(_))
    }

    /// Is either of the values a floating point number?
    pub fn either_is_float(a: &Value, b: &Value) -> bool
    {
        a.is_float() || b.is_float()
    }

    /// The test used by conditional branches.
    pub fn is_zero(&self) -> bool
    {
        match self
        {
            Value::Int(value)   => *value == 0,
            Value::Float(value) => *value == 0.0
        }
    }

    /// Get the value as an integer, floats are truncated towards zero.
    pub fn get_int_val(&self) -> i64
    {
        match self
        {
            Value::Int(value)   => *value,
            Value::Float(value) => *value as i64
        }
    }

    /// Get the value as a floating point number.
    pub fn get_float_val(&self) -> f64
    {
        match self
        {
            Value::Int(value)   => *value as f64,
            Value::Float(value) => *value
        }
    }
}
