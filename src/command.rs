//! Line-oriented command interpreter.
//!
//! Each input line holds one operation:
//!
//! ```text
//! INC <int>   include the integer
//! REM <int>   erase one copy of the integer
//! SUC <int>   print the successor, or nothing if there is none
//! IMP         print every value, space-separated
//! EXT         stop reading
//! ```
//!
//! Blank lines are skipped. Unknown opcodes are skipped with a warning.

use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::ordered_list::OrderedList;

/// Errors raised while interpreting a command stream.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An opcode that needs an integer came without one.
    #[error("line {line}: {opcode} expects an integer operand")]
    MissingOperand {
        /// 1-based input line number.
        line: usize,
        /// The opcode as written.
        opcode: String,
    },

    /// The operand could not be parsed as an integer.
    #[error("line {line}: invalid integer operand {operand:?}")]
    InvalidOperand {
        /// 1-based input line number.
        line: usize,
        /// The offending text.
        operand: String,
    },

    /// The list reported a broken invariant.
    #[error(transparent)]
    Structure(#[from] crate::error::Error),
}

/// One parsed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `INC <int>`
    Include(i64),
    /// `REM <int>`
    Erase(i64),
    /// `SUC <int>`
    Successor(i64),
    /// `IMP`
    Print,
    /// `EXT`
    Exit,
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for blank lines and
    /// unknown opcodes.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(opcode) = tokens.next() else {
            return Ok(None);
        };

        let operand = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<i64, CommandError> {
            let text = tokens.next().ok_or_else(|| CommandError::MissingOperand {
                line: line_no,
                opcode: opcode.to_string(),
            })?;
            i64::from_str(text).map_err(|_| CommandError::InvalidOperand {
                line: line_no,
                operand: text.to_string(),
            })
        };

        let command = match opcode {
            "INC" => Command::Include(operand(&mut tokens)?),
            "REM" => Command::Erase(operand(&mut tokens)?),
            "SUC" => Command::Successor(operand(&mut tokens)?),
            "IMP" => Command::Print,
            "EXT" => Command::Exit,
            other => {
                warn!(line = line_no, opcode = other, "skipping unknown opcode");
                return Ok(None);
            }
        };
        Ok(Some(command))
    }
}

/// Apply every command read from `input` to `list`, writing query results
/// to `output`. Stops at `EXT` or end of input.
pub fn run<R: BufRead, W: Write>(
    list: &mut OrderedList,
    input: R,
    mut output: W,
) -> Result<(), CommandError> {
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let Some(command) = Command::parse(&line, i + 1)? else {
            continue;
        };
        match command {
            Command::Include(x) => list.include(x)?,
            Command::Erase(x) => list.erase(x)?,
            Command::Successor(x) => {
                if let Some(s) = list.successor(x) {
                    writeln!(output, "{s}")?;
                }
            }
            Command::Print => writeln!(output, "{list}")?,
            Command::Exit => break,
        }
    }
    output.flush()?;
    Ok(())
}
