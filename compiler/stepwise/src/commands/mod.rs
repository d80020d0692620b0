//! Command handlers for the stepwise CLI.
//!
//! Each submodule implements one command. Handlers return whether every
//! input succeeded; the binary turns that into the exit status.

mod check;
mod trace;

pub use check::{check_files, check_program, check_source, CheckReport, Construct, Finding};
pub use trace::{
    parse_trace_args, trace_all, trace_files, trace_input, trace_source, TraceArgs, TraceOptions,
    TraceReport,
};
