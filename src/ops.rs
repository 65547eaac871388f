use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::One;

use crate::angle::AngleMode;
use crate::errors::*;
use crate::value::*;

use lazy_static::lazy_static;

/// tangent is rejected this close to an odd multiple of 90 degrees
pub const TAN_EPSILON: f64 = 1e-9;

/// Session settings an operator may depend on
#[derive(Clone, Copy, Debug)]
pub struct OpEnv {
    pub mode: AngleMode,
    pub max_factorial: u64,
}

pub type UnaryFn = fn(f64, &OpEnv) -> CalcResult<Value>;
pub type BinaryFn = fn(f64, f64) -> CalcResult<Value>;

/// An entry of the operator table: arity plus the guarded function
#[derive(Clone, Copy)]
pub enum Operator {
    Unary(UnaryFn),
    Binary(BinaryFn),
}

impl Operator {
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Unary(..))
    }
}

lazy_static! {
    // binary operators first: this is the order the prompt shows them in
    static ref TABLE: Vec<(&'static str, Operator)> = vec![
        ("+", Operator::Binary(add)),
        ("-", Operator::Binary(subtract)),
        ("*", Operator::Binary(multiply)),
        ("/", Operator::Binary(divide)),
        ("//", Operator::Binary(floor_divide)),
        ("**", Operator::Binary(power)),
        ("%", Operator::Binary(modulus)),
        ("sqrt", Operator::Unary(square_root)),
        ("log", Operator::Unary(log_base10)),
        ("sin", Operator::Unary(sine)),
        ("cos", Operator::Unary(cosine)),
        ("tan", Operator::Unary(tangent)),
        ("asin", Operator::Unary(arc_sine)),
        ("acos", Operator::Unary(arc_cosine)),
        ("atan", Operator::Unary(arc_tangent)),
        ("!", Operator::Unary(factorial)),
    ];
    static ref OPERATORS: HashMap<&'static str, Operator> = TABLE.iter().cloned().collect();
    static ref SYMBOLS: Vec<&'static str> = TABLE.iter().map(|(s, _)| *s).collect();
}

/// Finds an operator by its exact symbol
pub fn lookup(symbol: &str) -> Option<Operator> {
    OPERATORS.get(symbol).copied()
}

/// All operator symbols in display order
pub fn symbols() -> &'static [&'static str] {
    &SYMBOLS
}

fn finite(f: f64) -> CalcResult<Value> {
    if f.is_finite() {
        Ok(Value::Float(f))
    } else {
        Err(CalcError::domain("Result is too large to represent."))
    }
}

macro_rules! basic_op {
    ($id:ident, $op:tt) => {
        fn $id(n1: f64, n2: f64) -> CalcResult<Value> {
            finite(n1 $op n2)
        }
    };
}

basic_op!(add, +);
basic_op!(subtract, -);
basic_op!(multiply, *);

fn divide(n1: f64, n2: f64) -> CalcResult<Value> {
    if n2 == 0.0 {
        return Err(CalcError::domain("Unable to divide by zero."));
    }
    finite(n1 / n2)
}

// quotient and remainder come from the same fmod, so that
// (n1 // n2) * n2 + n1 % n2 == n1 and the remainder takes the sign of the divisor
fn floored_divmod(n1: f64, n2: f64) -> (f64, f64) {
    let mut r = n1 % n2;
    let mut div = (n1 - r) / n2;
    if r != 0.0 && (r < 0.0) != (n2 < 0.0) {
        r += n2;
        div -= 1.0;
    }
    let mut q = div.floor();
    if div - q > 0.5 {
        q += 1.0;
    }
    (q, r)
}

fn floor_divide(n1: f64, n2: f64) -> CalcResult<Value> {
    if n2 == 0.0 {
        return Err(CalcError::domain("Unable to divide by zero."));
    }
    finite(floored_divmod(n1, n2).0)
}

fn modulus(n1: f64, n2: f64) -> CalcResult<Value> {
    if n2 == 0.0 {
        return Err(CalcError::domain("Unable to perform modulus by zero."));
    }
    finite(floored_divmod(n1, n2).1)
}

fn power(n1: f64, n2: f64) -> CalcResult<Value> {
    if n1 == 0.0 && n2 < 0.0 {
        return Err(CalcError::domain("Zero cannot be raised to a negative power."));
    }
    if n1 < 0.0 && n2.fract() != 0.0 {
        return Err(CalcError::domain(
            "A negative number cannot be raised to a fractional power.",
        ));
    }
    finite(n1.powf(n2))
}

fn square_root(n1: f64, _env: &OpEnv) -> CalcResult<Value> {
    if n1 < 0.0 {
        return Err(CalcError::domain(
            "Unable to calculate the square root of a negative number.",
        ));
    }
    finite(n1.sqrt())
}

fn log_base10(n1: f64, _env: &OpEnv) -> CalcResult<Value> {
    if n1 <= 0.0 {
        return Err(CalcError::domain("Logarithm is only defined for positive numbers."));
    }
    finite(n1.log10())
}

fn sine(n1: f64, env: &OpEnv) -> CalcResult<Value> {
    finite(env.mode.to_internal(n1).sin())
}

fn cosine(n1: f64, env: &OpEnv) -> CalcResult<Value> {
    finite(env.mode.to_internal(n1).cos())
}

fn tangent(n1: f64, env: &OpEnv) -> CalcResult<Value> {
    let degrees = env.mode.as_degrees(n1);
    if (degrees.rem_euclid(180.0) - 90.0).abs() < TAN_EPSILON {
        return Err(CalcError::domain("Tangent is undefined for 90, 270, etc."));
    }
    finite(env.mode.to_internal(n1).tan())
}

macro_rules! arc_op {
    ($id:ident, $f:ident, $name:literal) => {
        fn $id(n1: f64, env: &OpEnv) -> CalcResult<Value> {
            if !(-1.0..=1.0).contains(&n1) {
                return Err(CalcError::domain(concat!(
                    $name,
                    " is only defined for values between -1 and 1."
                )));
            }
            finite(env.mode.from_internal(n1.$f()))
        }
    };
}

arc_op!(arc_sine, asin, "Inverse sine");
arc_op!(arc_cosine, acos, "Inverse cosine");

fn arc_tangent(n1: f64, env: &OpEnv) -> CalcResult<Value> {
    finite(env.mode.from_internal(n1.atan()))
}

fn factorial(n1: f64, env: &OpEnv) -> CalcResult<Value> {
    if n1 < 0.0 {
        return Err(CalcError::domain("Factorial is not defined for negative numbers."));
    }
    if n1.fract() != 0.0 {
        return Err(CalcError::domain("Factorial is only defined for whole numbers."));
    }
    if n1 > env.max_factorial as f64 {
        return Err(CalcError::MathDomain(format!(
            "Factorial is limited to numbers up to {}.",
            env.max_factorial
        )));
    }
    let n = n1 as u64;
    let mut res = BigInt::one();
    for cnt in 2..=n {
        res *= cnt;
    }
    Ok(Value::Int(res))
}
