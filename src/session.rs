use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::*;
use crate::eval::Evaluator;
use crate::ops;
use crate::parse::{self, Command, ResolvedOperand, CONSTANTS};
use crate::state::SessionState;
use crate::stats::run_stats;
use crate::value::Value;

pub const PROGRAM_NAME: &str = "tcalc";

const FIRST_PROMPT: &str = "Enter the first number: ";
const SECOND_PROMPT: &str = "Enter the second number: ";
const OPERATOR_PROMPT: &str = "Pick an operation: ";
const STATS_PROMPT: &str = "Enter numbers separated by commas: ";
const CONTINUE_PROMPT: &str = "Do you want to continue? (y/n): ";

/// Supplies one line of user input per prompt. `None` means the input is over
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Receives every line the session prints
pub trait LineSink {
    fn write_line(&mut self, line: &str);
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Next,
    Quit,
}

/// Interactive calculator session: prompts for operands and an operator,
/// prints results and keeps the state between iterations
pub struct Session<I, O> {
    state: SessionState,
    evaluator: Evaluator,
    settings: Settings,
    input: I,
    output: O,
}

impl<I: LineSource, O: LineSink> Session<I, O> {
    pub fn new(settings: Settings, input: I, output: O) -> Self {
        let settings = settings.clamped();
        Session {
            state: SessionState::with_mode(settings.angle_mode),
            evaluator: Evaluator::new(&settings),
            settings,
            input,
            output,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Runs until the user declines to continue or the input ends
    pub fn run(&mut self) {
        info!(mode = %self.state.angle_mode(), precision = self.settings.precision, "session started");
        self.banner();
        while self.iteration() == Flow::Next {}
        self.say(&format!("Thank you for using {}!", PROGRAM_NAME));
        info!(calculations = self.state.history().len(), "session finished");
    }

    fn say(&mut self, line: &str) {
        self.output.write_line(line);
    }

    fn report(&mut self, err: &CalcError) {
        if err.is_math() {
            self.say(&format!("Math Error: {}", err));
        } else {
            self.say(&err.to_string());
        }
    }

    fn banner(&mut self) {
        self.say("==============================================");
        self.say(&format!("{} - terminal calculator", PROGRAM_NAME));
        self.say(&format!("Angle mode: {}", self.state.angle_mode()));
        self.say("Type 'help' to list commands");
        self.say("==============================================");
    }

    fn help(&mut self) {
        let commands: Vec<&str> = [
            Command::Stats,
            Command::Mode,
            Command::History,
            Command::MemoryAdd,
            Command::MemoryClear,
            Command::Help,
        ]
        .iter()
        .map(|c| c.keyword())
        .collect();
        self.say(&format!("Commands: {}", commands.join(" | ")));
        self.say(&format!("Values: ans | mem | {}", CONSTANTS.join(" | ")));
        self.say(&format!("Operations: {}", ops::symbols().join(" | ")));
    }

    fn read_token(&mut self, prompt: &str) -> Option<String> {
        self.input.read_line(prompt).map(|l| l.trim().to_lowercase())
    }

    // blocks until the answer is a number or a command; `help` is answered here
    fn read_operand(&mut self, prompt: &str) -> Option<ResolvedOperand> {
        loop {
            let token = self.read_token(prompt)?;
            match parse::resolve(&token, &self.state) {
                Ok(ResolvedOperand::Command(Command::Help)) => self.help(),
                Ok(r) => return Some(r),
                Err(e) => {
                    debug!(token = %token, error = %e, "operand rejected");
                    self.report(&e);
                }
            }
        }
    }

    // only a bare `y` continues: surrounding blanks count as a no
    fn ask_continue(&mut self) -> Flow {
        match self.input.read_line(CONTINUE_PROMPT) {
            Some(answer) if answer.to_lowercase() == "y" => Flow::Next,
            _ => Flow::Quit,
        }
    }

    fn iteration(&mut self) -> Flow {
        let first = match self.read_operand(FIRST_PROMPT) {
            Some(ResolvedOperand::Number(v)) => v,
            Some(ResolvedOperand::Command(cmd)) => return self.command(cmd),
            None => return Flow::Quit,
        };
        self.calculation(first)
    }

    fn calculation(&mut self, first: Value) -> Flow {
        self.say(&format!("Available operations: {}", ops::symbols().join(" | ")));
        let symbol = match self.read_token(OPERATOR_PROMPT) {
            Some(s) => s,
            None => return Flow::Quit,
        };
        let op = match ops::lookup(&symbol) {
            Some(op) => op,
            None => {
                self.say("Invalid operator. Please try again.");
                return Flow::Next;
            }
        };

        let second = if op.is_unary() {
            self.say(&format!("Selected '{}'. No second number needed.", symbol));
            None
        } else {
            match self.read_operand(SECOND_PROMPT) {
                Some(r) => Some(r),
                None => return Flow::Quit,
            }
        };

        match self.evaluator.calculate(&mut self.state, &first, &symbol, second) {
            Ok(calc) => self.say(&format!("Result: {}", calc)),
            Err(e @ CalcError::MidCalculationCommand(..)) => {
                self.report(&e);
                self.say("Calculation discarded.");
                return Flow::Next;
            }
            Err(e) => self.report(&e),
        }
        self.ask_continue()
    }

    fn command(&mut self, cmd: Command) -> Flow {
        debug!(command = cmd.keyword(), "command");
        match cmd {
            Command::Stats => return self.statistics(),
            Command::Mode => {
                let mode = self.state.toggle_angle_mode();
                self.say(&format!("Angle mode switched to {}.", mode));
            }
            Command::History => self.history(),
            Command::MemoryAdd => match self.state.add_to_memory() {
                Ok(v) => {
                    let line = format!("Memory: {}", v);
                    self.say(&line);
                }
                Err(e) => self.report(&e),
            },
            Command::MemoryClear => {
                self.state.clear_memory();
                self.say("Memory cleared.");
            }
            Command::Help => self.help(),
        }
        Flow::Next
    }

    fn history(&mut self) {
        if self.state.history().is_empty() {
            self.say("No calculations yet.");
            return;
        }
        let lines: Vec<String> = self
            .state
            .history()
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {}", i + 1, entry))
            .collect();
        self.say("History:");
        for line in lines {
            self.say(&line);
        }
    }

    fn statistics(&mut self) -> Flow {
        let raw = match self.input.read_line(STATS_PROMPT) {
            Some(raw) => raw,
            None => return Flow::Quit,
        };
        match run_stats(&mut self.state, &raw, self.settings.precision) {
            Ok(Some(s)) => {
                self.say(&format!("Count: {}", s.count));
                self.say(&format!("Mean: {}", s.mean));
                self.say(&format!("Max: {}", s.max));
                self.say(&format!("Min: {}", s.min));
            }
            Ok(None) => self.say("No numbers entered."),
            Err(e) => self.report(&e),
        }
        self.ask_continue()
    }
}
