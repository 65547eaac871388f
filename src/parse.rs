use std::collections::HashMap;
use std::f64::consts::{E, PI, TAU};

use pest::Parser;

use crate::errors::*;
use crate::state::SessionState;
use crate::value::*;

use lazy_static::lazy_static;

#[derive(Parser)]
#[grammar = "token.pest"]
pub struct TokenParser;

const LAST_RESULT: &str = "ans";
const MEMORY: &str = "mem";

/// Keywords that steer the session instead of supplying a number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Stats,
    Mode,
    History,
    MemoryAdd,
    MemoryClear,
    Help,
}

lazy_static! {
    static ref COMMANDS: HashMap<&'static str, Command> = [
        ("stats", Command::Stats),
        ("mode", Command::Mode),
        ("history", Command::History),
        ("m+", Command::MemoryAdd),
        ("mc", Command::MemoryClear),
        ("help", Command::Help),
    ]
    .iter()
    .cloned()
    .collect();
}

impl Command {
    pub fn keyword(self) -> &'static str {
        match self {
            Command::Stats => "stats",
            Command::Mode => "mode",
            Command::History => "history",
            Command::MemoryAdd => "m+",
            Command::MemoryClear => "mc",
            Command::Help => "help",
        }
    }
}

/// What a prompt answer turned out to be: a number or a command, never both
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedOperand {
    Number(Value),
    Command(Command),
}

/// Returns a constant value by its name
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        "tau" => Some(TAU),
        _ => None,
    }
}

/// Names of all constants, for the help screen
pub const CONSTANTS: [&str; 3] = ["pi", "e", "tau"];

/// Turns a trimmed, lowercased prompt answer into a number or a command.
/// Only reads the session state
pub fn resolve(token: &str, state: &SessionState) -> CalcResult<ResolvedOperand> {
    if let Some(cmd) = COMMANDS.get(token) {
        return Ok(ResolvedOperand::Command(*cmd));
    }
    let value = match token {
        LAST_RESULT => state.last_result().cloned().ok_or(CalcError::NoPreviousResult)?,
        MEMORY => state.memory().clone(),
        _ => match constant(token) {
            Some(c) => Value::Float(c),
            None => Value::from_f64(parse_number(token)?),
        },
    };
    Ok(ResolvedOperand::Number(value))
}

/// Parses a single number literal
pub fn parse_number(token: &str) -> CalcResult<f64> {
    let invalid = || CalcError::InvalidNumericInput(token.to_string());
    let pairs = TokenParser::parse(Rule::operand, token).map_err(|_| invalid())?;
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::number {
            return Value::from_str_float(pair.as_str())?.into_raw_f64();
        }
    }
    Err(invalid())
}

/// Parses a comma separated list of numbers: `1, 2.5, -3`
pub fn parse_list(text: &str) -> CalcResult<Vec<f64>> {
    let invalid = || CalcError::InvalidStatsInput(text.to_string());
    let pairs = TokenParser::parse(Rule::stats_list, text).map_err(|_| invalid())?;
    let mut nums = Vec::new();
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::number {
            let f = Value::from_str_float(pair.as_str()).map_err(|_| invalid())?;
            nums.push(f.into_raw_f64()?);
        }
    }
    Ok(nums)
}
