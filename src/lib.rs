//! # Interactive calculator session
//!
//! Each step of a session reads a number, an operator and, for binary
//! operators, a second number, then prints the result. Unlike an expression
//! calculator there is no precedence and no parsing of formulas: one operator
//! is applied per step, and the session remembers what happened before.
//!
//! A number prompt accepts:
//! * plain numbers: `3`, `-2.5`, `.5`, `1_000`, `1.5e3`
//! * constants: `pi`, `e`, `tau`
//! * `ans` - the result of the last successful calculation
//! * `mem` - the memory value (zero at start)
//!
//! The first number prompt also accepts commands:
//! * `stats` - reads a comma separated list and prints its mean, maximum and
//!   minimum. The mean becomes `ans`
//! * `mode` - switches trigonometric functions between degrees and radians
//! * `history` - prints all completed calculations
//! * `m+` - adds `ans` to memory, `mc` - clears memory
//! * `help` - lists commands, values and operators (works at any number prompt)
//!
//! Operators:
//! * binary: `+`, `-`, `*`, `/`, `//` (floor division), `**` (power), `%` (modulus)
//! * unary: `sqrt`, `log` (base 10), `sin`, `cos`, `tan`, `asin`, `acos`, `atan`,
//!   `!` (factorial)
//!
//! Invalid arguments (division by zero, square root of a negative number,
//! tangent of 90 degrees, factorial of a fraction and so on) are reported and
//! leave the session state untouched. Results are rounded to 10 decimal places
//! and printed as integers when nothing remains after the decimal point.
//! Factorials are exact big integers.

#[macro_use]
extern crate pest_derive;

pub mod angle;
pub mod config;
pub mod errors;
pub mod eval;
pub mod ops;
pub mod parse;
pub mod session;
pub mod state;
pub mod stats;
pub mod value;

pub use angle::AngleMode;
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
pub use session::{LineSink, LineSource, Session};
pub use state::SessionState;
pub use value::Value;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sends diagnostics to stderr, filtered by `RUST_LOG` (e.g. `RUST_LOG=tcalc=debug`).
/// Returns false when `RUST_LOG` is unset or invalid, or a subscriber is already installed
pub fn init_tracing() -> bool {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return false;
    };
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .compact();
    tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init_twice() {
        init_tracing();
        assert!(!init_tracing());
    }
}
