//! Stepwise CLI - trace ESTree programs from the command line.
//!
//! The binary is a thin argument parser over [`commands`]; everything it
//! does is also reachable from here so it can be tested without spawning a
//! process.
//!
//! ```text
//! tree.json ──► read_input ──► parse_program_json ──► Interpreter::run
//!                                                          │
//!                                   TraceReport (JSON) ◄───┘
//! ```

pub mod commands;
pub mod errors;
pub mod input;
pub mod tracing_setup;

pub use errors::CliError;
pub use tracing_setup::init_tracing;
