//! Stepwise Eval - tracing interpreter for the stepwise visualizer.
//!
//! Walks an ESTree program once and records what happened, line by line, as
//! a list of structured events (declarations, loop updates, tests, swaps,
//! assignments).
//!
//! # Architecture
//!
//! - `Environment`: flat name → `Value` store for one run
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `History`: append-only event log; every array in it is a `Snapshot`
//! - `detect_swap`: syntactic recognition of the temp-variable swap idiom
//! - `Interpreter`: statement executor and expression evaluator
//!
//! ```text
//! let program = stepwise_ir::parse_program_json(&json)?;
//! let trace = Interpreter::builder().build().run(&program)?;
//! ```

mod builtins;
pub mod config;
mod environment;
pub mod errors;
pub mod history;
pub mod interpreter;
mod operators;
pub mod swap_pattern;
mod unary_operators;
pub mod value;

#[cfg(test)]
mod tests;

pub use builtins::Builtin;
pub use config::{TraceConfig, DEFAULT_ITERATION_CAP};
pub use environment::Environment;
pub use errors::{ErrorDescriptor, EvalError, EvalErrorKind, EvalResult};
pub use history::{EventDetails, EventKind, History, HistoryEvent, HistoryPolicy, LoopEndReason};
pub use interpreter::{trace_program, Interpreter, InterpreterBuilder, Trace, TraceFailure};
pub use operators::{evaluate_binary, is_supported_assign, is_supported_binary, is_supported_logical};
pub use swap_pattern::{detect_swap, SwapPlan};
pub use unary_operators::{evaluate_unary, is_supported_unary};
pub use value::{SharedArray, Snapshot, Value};
