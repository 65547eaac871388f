use tracing::debug;

use crate::angle::AngleMode;
use crate::errors::*;
use crate::value::*;

/// Everything a session remembers between calculations. Nothing is persisted:
/// the state lives as long as the session does
pub struct SessionState {
    last_result: Option<Value>,
    memory_val: Value,
    angle_mode: AngleMode,
    history: Vec<String>,
}

impl Default for SessionState {
    fn default() -> SessionState {
        SessionState::with_mode(AngleMode::default())
    }
}

impl SessionState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_mode(angle_mode: AngleMode) -> Self {
        SessionState {
            last_result: None,
            memory_val: Value::default(),
            angle_mode,
            history: Vec::new(),
        }
    }

    /// Returns the result of the last successful calculation
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    pub fn memory(&self) -> &Value {
        &self.memory_val
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Completed calculations, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn record_result(&mut self, value: Value) {
        debug!(result = %value, "result recorded");
        self.last_result = Some(value);
    }

    pub fn append_history(&mut self, entry: String) {
        debug!(entry = %entry, len = self.history.len() + 1, "history appended");
        self.history.push(entry);
    }

    /// Adds the last result to memory and returns the new memory value
    pub fn add_to_memory(&mut self) -> CalcResult<&Value> {
        let last = self.last_result.as_ref().ok_or(CalcError::NoResultAvailable)?;
        self.memory_val = self.memory_val.addition(last)?;
        debug!(memory = %self.memory_val, "memory updated");
        Ok(&self.memory_val)
    }

    pub fn clear_memory(&mut self) {
        self.memory_val = Value::default();
    }

    /// Flips degrees and radians. Already stored results are left as they are
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggled();
        debug!(mode = %self.angle_mode, "angle mode switched");
        self.angle_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert!(state.last_result().is_none());
        assert!(state.memory().is_zero());
        assert_eq!(state.angle_mode(), AngleMode::Degrees);
        assert!(state.history().is_empty());
        let state = SessionState::with_mode(AngleMode::Radians);
        assert_eq!(state.angle_mode(), AngleMode::Radians);
    }

    #[test]
    fn test_memory() {
        let mut state = SessionState::new();
        assert_eq!(state.add_to_memory().err(), Some(CalcError::NoResultAvailable));
        assert!(state.memory().is_zero());

        state.record_result(Value::from(7));
        assert_eq!(state.add_to_memory().cloned(), Ok(Value::from(7)));
        state.record_result(Value::Float(0.5));
        assert_eq!(state.add_to_memory().cloned(), Ok(Value::Float(7.5)));
        state.clear_memory();
        assert_eq!(state.memory(), &Value::from(0));
    }

    #[test]
    fn test_toggle_keeps_results() {
        let mut state = SessionState::new();
        state.record_result(Value::from(90));
        state.append_history("asin(1) = 90".to_string());
        assert_eq!(state.toggle_angle_mode(), AngleMode::Radians);
        assert_eq!(state.toggle_angle_mode(), AngleMode::Degrees);
        assert_eq!(state.last_result(), Some(&Value::from(90)));
        assert_eq!(state.history(), &["asin(1) = 90".to_string()]);
    }
}
