use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use tcalc::config::{DEFAULT_MAX_FACTORIAL, DEFAULT_PRECISION, MAX_FACTORIAL_LIMIT, MAX_PRECISION};
use tcalc::{init_tracing, AngleMode, LineSink, LineSource, Session, Settings};

/// Interactive calculator with answer recall, memory, history and statistics
#[derive(Parser)]
#[command(name = "tcalc", version)]
struct Opts {
    /// Start in radians instead of degrees
    #[arg(long)]
    radians: bool,
    /// Decimal places results are rounded to
    #[arg(
        long,
        default_value_t = DEFAULT_PRECISION,
        value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64)
    )]
    precision: u32,
    /// The largest number the factorial operator accepts
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_FACTORIAL,
        value_parser = clap::value_parser!(u64).range(0..=MAX_FACTORIAL_LIMIT)
    )]
    max_factorial: u64,
}

struct Editor(DefaultEditor);

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.0.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.0.add_history_entry(line.as_str()) {
                    warn!(error = %e, "failed to remember input line");
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                warn!(error = %e, "failed to read input");
                None
            }
        }
    }
}

struct Console;

impl LineSink for Console {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

fn main() -> rustyline::Result<()> {
    init_tracing();
    let opts = Opts::parse();
    let settings = Settings {
        precision: opts.precision,
        angle_mode: if opts.radians { AngleMode::Radians } else { AngleMode::Degrees },
        max_factorial: opts.max_factorial,
    };

    let editor = Editor(DefaultEditor::new()?);
    let mut session = Session::new(settings, editor, Console);
    session.run();
    Ok(())
}
