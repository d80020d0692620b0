//! Reading and decoding input trees.

use std::io;

use stepwise_ir::{parse_program_json, Program};

use crate::errors::CliError;

/// The path that stands for standard input.
pub const STDIN: &str = "-";

/// Read `path`, or standard input for `-`.
pub fn read_input(path: &str) -> Result<String, CliError> {
    if path == STDIN {
        io::read_to_string(io::stdin()).map_err(|err| CliError::from_io("<stdin>", err))
    } else {
        std::fs::read_to_string(path).map_err(|err| CliError::from_io(path, err))
    }
}

/// Decode ESTree JSON read from `path`.
pub fn decode(path: &str, text: &str) -> Result<Program, CliError> {
    parse_program_json(text).map_err(|source| CliError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Display name for an input in reports.
pub fn display_name(path: &str) -> &str {
    if path == STDIN {
        "<stdin>"
    } else {
        path
    }
}
