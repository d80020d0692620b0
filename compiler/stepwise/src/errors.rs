//! Failures outside the interpreter: reading inputs, decoding trees and
//! parsing flags.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("'{path}' is not a valid ESTree program: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid value for {flag}: '{value}'")]
    InvalidFlag { flag: &'static str, value: String },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("missing input file")]
    MissingInput,
}

impl CliError {
    /// Classify an I/O failure on `path` the way users expect to read it.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        let path = path.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source: err },
        }
    }
}
