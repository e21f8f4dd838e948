//! Run results and how they are printed

use std::io::{self, Write};

/// Outcome of one posted comment, or of a run that stopped early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Successful(String),
    Error(String),
}

impl Output {
    pub fn message(&self) -> &str {
        match self {
            Output::Successful(message) | Output::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Output::Error(_))
    }
}

/// Print each output on its own line, successes to `out` and errors to `err`
pub fn print_outputs(outputs: &[Output], out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    for output in outputs {
        if output.is_error() {
            writeln!(err, "{}", output.message())?;
        } else {
            writeln!(out, "{}", output.message())?;
        }
    }
    out.flush()?;
    err.flush()
}

/// Process exit code: 1 if any output is an error
pub fn exit_code(outputs: &[Output]) -> u8 {
    if outputs.iter().any(Output::is_error) { 1 } else { 0 }
}
