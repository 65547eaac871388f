use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::fmt;

use crate::errors::*;

/// A number as the session stores and prints it
#[derive(Clone)]
pub enum Value {
    /// Integral number. Results with zero fractional part collapse into it
    Int(BigInt),
    /// Float number
    Float(f64),
}

// beyond 2^52 an f64 has no fractional digits left to round
const EXACT_F64_LIMIT: f64 = 4_503_599_627_370_496.0;

fn format_f64(g: f64) -> String {
    let mut buf = dtoa::Buffer::new();
    buf.format(g).to_string()
}

/// Rounds a float to `digits` decimal places. Huge values are returned as is
pub fn round_to(f: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = f * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_F64_LIMIT {
        return f;
    }
    scaled.round() / scale
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Value::Int(ref i) => write!(f, "{}", i),
            Value::Float(ref g) => write!(f, "{}", format_f64(*g)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Value::Int(ref i) => write!(f, " Int({:?})", i),
            Value::Float(ref g) => write!(f, " Float({:?})", g),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, &other) {
            (Value::Int(ref i1), Value::Int(ref i2)) => i1 == i2,
            (Value::Float(ref f1), Value::Float(ref f2)) => f1 == f2,
            (_, _) => false,
        }
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::Int(BigInt::zero())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(BigInt::from(i))
    }
}

impl Value {
    /// Wraps a float, turning it into an integer if it has no fractional part
    pub fn from_f64(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 {
            if let Some(i) = BigInt::from_f64(f) {
                return Value::Int(i);
            }
        }
        Value::Float(f)
    }

    /// Rounds a raw result to `digits` decimal places and collapses it
    /// to an integer when nothing is left after the decimal point
    pub fn normalized(f: f64, digits: u32) -> Self {
        Value::from_f64(round_to(f, digits))
    }

    /// Parses a plain decimal literal. Underscores between digits are allowed
    pub fn from_str_float(s: &str) -> CalcResult<Value> {
        let clean = s.replace('_', "");
        match clean.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(CalcError::InvalidNumericInput(s.to_owned())),
        }
    }

    pub fn into_raw_f64(&self) -> CalcResult<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => match i.to_f64() {
                Some(f) if f.is_finite() => Ok(f),
                _ => Err(CalcError::IntToFloat {
                    digits: i.magnitude().to_str_radix(10).len(),
                }),
            },
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(i) => i.is_zero(),
            Value::Float(f) => *f == 0.0,
        }
    }

    /// Adds two values, keeping integers exact
    pub fn addition(&self, rhs: &Value) -> CalcResult<Value> {
        match (self, rhs) {
            (Value::Int(i1), Value::Int(i2)) => Ok(Value::Int(i1 + i2)),
            _ => {
                let f = self.into_raw_f64()? + rhs.into_raw_f64()?;
                Ok(Value::from_f64(f))
            }
        }
    }
}
