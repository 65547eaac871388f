use tracing::debug;

use crate::errors::*;
use crate::parse::parse_list;
use crate::state::SessionState;
use crate::value::*;

/// Mean, minimum and maximum of a list of numbers
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: Value,
    pub min: Value,
    pub max: Value,
}

/// Computes statistics over a comma separated list and commits the mean as
/// the new result. Blank input is not an error: nothing is computed and
/// `None` is returned. A bad list leaves the state untouched
pub fn run_stats(state: &mut SessionState, raw: &str, precision: u32) -> CalcResult<Option<Summary>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let nums = parse_list(raw)?;
    let summary = match summarize(&nums, precision)? {
        Some(s) => s,
        None => return Ok(None),
    };

    let listed: Vec<String> = nums.iter().map(|f| Value::from_f64(*f).to_string()).collect();
    let entry = format!("mean({}) = {}", listed.join(", "), summary.mean);
    debug!(count = summary.count, "statistics computed");
    state.append_history(entry);
    state.record_result(summary.mean.clone());
    Ok(Some(summary))
}

fn summarize(nums: &[f64], precision: u32) -> CalcResult<Option<Summary>> {
    if nums.is_empty() {
        return Ok(None);
    }
    let sum: f64 = nums.iter().sum();
    let mean = sum / nums.len() as f64;
    if !mean.is_finite() {
        return Err(CalcError::domain("Result is too large to represent."));
    }
    let min = nums.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = nums.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Ok(Some(Summary {
        count: nums.len(),
        mean: Value::normalized(mean, precision),
        min: Value::from_f64(min),
        max: Value::from_f64(max),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats() {
        let mut state = SessionState::new();
        let s = run_stats(&mut state, "1, 2, 3", 10).unwrap().unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, Value::from(2));
        assert_eq!(s.max, Value::from(3));
        assert_eq!(s.min, Value::from(1));
        assert_eq!(state.last_result(), Some(&Value::from(2)));
        assert_eq!(state.history(), &["mean(1, 2, 3) = 2".to_string()]);
    }

    #[test]
    fn test_single_value() {
        let mut state = SessionState::new();
        let s = run_stats(&mut state, "-4.5", 10).unwrap().unwrap();
        assert_eq!(s.mean, Value::Float(-4.5));
        assert_eq!(s.min, s.max);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_rounded_mean() {
        let mut state = SessionState::new();
        let s = run_stats(&mut state, "1,1,2", 10).unwrap().unwrap();
        assert_eq!(s.mean, Value::Float(1.3333333333));
    }

    #[test]
    fn test_invalid_list() {
        let mut state = SessionState::new();
        let res = run_stats(&mut state, "1, x, 3", 10);
        assert_eq!(res, Err(CalcError::InvalidStatsInput("1, x, 3".to_string())));
        assert!(state.history().is_empty());
        assert!(state.last_result().is_none());
    }

    #[test]
    fn test_blank_is_noop() {
        let mut state = SessionState::new();
        assert_eq!(run_stats(&mut state, "   ", 10), Ok(None));
        assert!(state.history().is_empty());
        assert!(state.last_result().is_none());
    }
}
