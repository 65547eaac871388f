use std::fmt;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::errors::*;
use crate::ops::{self, OpEnv, Operator};
use crate::parse::ResolvedOperand;
use crate::state::SessionState;
use crate::value::*;

/// A completed calculation: how it was written and what it gave
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub expression: String,
    pub result: Value,
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Runs one operator over resolved operands and commits the result
pub struct Evaluator {
    precision: u32,
    max_factorial: u64,
}

impl Default for Evaluator {
    fn default() -> Evaluator {
        Evaluator::new(&Settings::default())
    }
}

impl Evaluator {
    pub fn new(settings: &Settings) -> Self {
        let settings = settings.clamped();
        Evaluator {
            precision: settings.precision,
            max_factorial: settings.max_factorial,
        }
    }

    fn normalize(&self, raw: Value) -> Value {
        match raw {
            Value::Float(f) => Value::normalized(f, self.precision),
            v => v,
        }
    }

    /// Applies `symbol` to `first` (and `second` for binary operators).
    /// The state changes only when the calculation succeeds: the result becomes
    /// `ans` and one history entry is appended
    pub fn calculate(
        &self,
        state: &mut SessionState,
        first: &Value,
        symbol: &str,
        second: Option<ResolvedOperand>,
    ) -> CalcResult<Calculation> {
        let res = self.compute(state, first, symbol, second);
        match res {
            Ok(calc) => {
                debug!(calculation = %calc, "calculation committed");
                state.append_history(calc.to_string());
                state.record_result(calc.result.clone());
                Ok(calc)
            }
            Err(e) => {
                warn!(op = symbol, error = %e, "calculation aborted");
                Err(e)
            }
        }
    }

    fn compute(
        &self,
        state: &SessionState,
        first: &Value,
        symbol: &str,
        second: Option<ResolvedOperand>,
    ) -> CalcResult<Calculation> {
        let op = ops::lookup(symbol).ok_or_else(|| CalcError::UnknownOperator(symbol.to_string()))?;
        let env = OpEnv {
            mode: state.angle_mode(),
            max_factorial: self.max_factorial,
        };
        let n1 = first.into_raw_f64()?;

        let (raw, expression) = match op {
            Operator::Unary(f) => (f(n1, &env)?, format!("{}({})", symbol, first)),
            Operator::Binary(f) => {
                let second = match second {
                    Some(ResolvedOperand::Number(v)) => v,
                    Some(ResolvedOperand::Command(cmd)) => {
                        return Err(CalcError::MidCalculationCommand(cmd.keyword().to_string()))
                    }
                    None => return Err(CalcError::MissingOperand(symbol.to_string())),
                };
                let n2 = second.into_raw_f64()?;
                (f(n1, n2)?, format!("{} {} {}", first, symbol, second))
            }
        };

        Ok(Calculation {
            expression,
            result: self.normalize(raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Command;
    use pretty_assertions::assert_eq;

    fn num(i: i64) -> Option<ResolvedOperand> {
        Some(ResolvedOperand::Number(Value::from(i)))
    }

    fn binary(state: &mut SessionState, a: i64, op: &str, b: i64) -> CalcResult<Calculation> {
        Evaluator::default().calculate(state, &Value::from(a), op, num(b))
    }

    fn unary(state: &mut SessionState, op: &str, a: f64) -> CalcResult<Calculation> {
        Evaluator::default().calculate(state, &Value::from_f64(a), op, None)
    }

    fn assert_domain_error(res: CalcResult<Calculation>) {
        match res {
            Err(CalcError::MathDomain(..)) => {}
            other => panic!("expected a math error, got {:?}", other),
        }
    }

    #[test]
    fn test_binary() {
        let mut state = SessionState::new();
        let calc = binary(&mut state, 2, "+", 3).unwrap();
        assert_eq!(calc.result, Value::from(5));
        assert_eq!(calc.to_string(), "2 + 3 = 5");
        assert_eq!(state.last_result(), Some(&Value::from(5)));
        assert_eq!(state.history(), &["2 + 3 = 5".to_string()]);

        let calc = binary(&mut state, 7, "/", 2).unwrap();
        assert_eq!(calc.to_string(), "7 / 2 = 3.5");
        let calc = binary(&mut state, 1, "/", 3).unwrap();
        assert_eq!(calc.result, Value::Float(0.3333333333));
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_float_noise_is_rounded() {
        let mut state = SessionState::new();
        let ev = Evaluator::default();
        let calc = ev
            .calculate(
                &mut state,
                &Value::Float(0.1),
                "+",
                Some(ResolvedOperand::Number(Value::Float(0.2))),
            )
            .unwrap();
        assert_eq!(calc.to_string(), "0.1 + 0.2 = 0.3");
    }

    #[test]
    fn test_precision_setting() {
        let settings = Settings {
            precision: 2,
            ..Settings::default()
        };
        let mut state = SessionState::new();
        let calc = Evaluator::new(&settings)
            .calculate(&mut state, &Value::from(2), "/", num(3))
            .unwrap();
        assert_eq!(calc.result, Value::Float(0.67));
    }

    #[test]
    fn test_out_of_range_settings() {
        let settings = Settings {
            precision: 3_000_000_000,
            max_factorial: u64::MAX,
            ..Settings::default()
        };
        let ev = Evaluator::new(&settings);
        let mut state = SessionState::new();
        let calc = ev.calculate(&mut state, &Value::from(1), "/", num(3)).unwrap();
        assert_eq!(calc.result, Value::Float(0.333333333333333));
        let res = ev.calculate(&mut state, &Value::Float(1e18), "!", None);
        assert!(matches!(res, Err(CalcError::MathDomain(..))));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_zero_divisor_keeps_state() {
        let mut state = SessionState::new();
        binary(&mut state, 4, "+", 3).unwrap();
        for op in ["/", "//", "%"] {
            assert_domain_error(binary(&mut state, 1, op, 0));
        }
        assert_eq!(state.last_result(), Some(&Value::from(7)));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_unary_domain() {
        let mut state = SessionState::new();
        assert_domain_error(unary(&mut state, "sqrt", -1.0));
        assert_domain_error(unary(&mut state, "log", 0.0));
        assert_domain_error(unary(&mut state, "log", -5.0));
        assert_domain_error(unary(&mut state, "tan", 90.0));
        assert_domain_error(unary(&mut state, "!", -1.0));
        assert_domain_error(unary(&mut state, "!", 2.5));
        assert!(state.history().is_empty());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_unary() {
        let mut state = SessionState::new();
        let calc = unary(&mut state, "sqrt", 16.0).unwrap();
        assert_eq!(calc.to_string(), "sqrt(16) = 4");
        let calc = unary(&mut state, "!", 5.0).unwrap();
        assert_eq!(calc.result, Value::from(120));
        assert_eq!(calc.to_string(), "!(5) = 120");
        assert_eq!(unary(&mut state, "tan", 45.0).unwrap().result, Value::from(1));
        assert_eq!(unary(&mut state, "sin", 30.0).unwrap().result, Value::Float(0.5));
        assert_eq!(unary(&mut state, "cos", 60.0).unwrap().result, Value::Float(0.5));
        assert_eq!(unary(&mut state, "asin", 1.0).unwrap().result, Value::from(90));
        assert_eq!(state.history().len(), 6);
        assert_eq!(state.last_result(), Some(&Value::from(90)));
    }

    #[test]
    fn test_radians() {
        let mut state = SessionState::new();
        state.toggle_angle_mode();
        let calc = Evaluator::default()
            .calculate(&mut state, &Value::Float(std::f64::consts::PI), "cos", None)
            .unwrap();
        assert_eq!(calc.result, Value::from(-1));
        assert_eq!(unary(&mut state, "asin", 1.0).unwrap().result, Value::Float(1.5707963268));
        state.toggle_angle_mode();
        assert_eq!(unary(&mut state, "asin", 1.0).unwrap().result, Value::from(90));
    }

    #[test]
    fn test_command_as_second_operand() {
        let mut state = SessionState::new();
        let res = Evaluator::default().calculate(
            &mut state,
            &Value::from(3),
            "+",
            Some(ResolvedOperand::Command(Command::Stats)),
        );
        assert_eq!(res, Err(CalcError::MidCalculationCommand("stats".to_string())));
        assert!(state.history().is_empty());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_bad_operator() {
        let mut state = SessionState::new();
        let res = binary(&mut state, 3, "^", 2);
        assert_eq!(res, Err(CalcError::UnknownOperator("^".to_string())));
        let res = Evaluator::default().calculate(&mut state, &Value::from(3), "+", None);
        assert_eq!(res, Err(CalcError::MissingOperand("+".to_string())));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_ans_tracks_display() {
        let mut state = SessionState::new();
        let calc = binary(&mut state, 10, "//", 4).unwrap();
        assert_eq!(state.last_result(), Some(&calc.result));
        assert_eq!(calc.to_string(), "10 // 4 = 2");
    }
}
