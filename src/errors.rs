use thiserror::Error;

/// Result of any fallible calculator step
pub type CalcResult<T> = Result<T, CalcError>;

/// Every failure the calculator can report. None of them ends a session:
/// the driver prints the message and goes on with the next prompt
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input '{0}'. Please enter a number")]
    InvalidNumericInput(String),
    #[error("No previous result available")]
    NoPreviousResult,
    #[error("{0}")]
    MathDomain(String),
    #[error("Command '{0}' cannot be used in the middle of a calculation")]
    MidCalculationCommand(String),
    #[error("Invalid list '{0}'. Please enter numbers separated by commas")]
    InvalidStatsInput(String),
    #[error("No result to add to memory")]
    NoResultAvailable,

    #[error("Invalid operator '{0}'")]
    UnknownOperator(String),
    #[error("Operator '{0}' requires a second number")]
    MissingOperand(String),
    #[error("Integer with {digits} digits is too large for a float")]
    IntToFloat { digits: usize },
}

impl CalcError {
    pub(crate) fn domain(msg: &str) -> Self {
        CalcError::MathDomain(msg.to_string())
    }

    /// Math errors are reported with their own prefix in the console
    pub fn is_math(&self) -> bool {
        matches!(self, CalcError::MathDomain(..) | CalcError::IntToFloat { .. })
    }
}
