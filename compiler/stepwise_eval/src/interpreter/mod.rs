//! Tree-walking tracer.
//!
//! One `Interpreter` performs one trace run: it owns a fresh environment and
//! history, walks the program once, and hands both back as a [`Trace`] (or a
//! [`TraceFailure`] carrying the history recorded before the error).
//!
//! - `expr.rs` evaluates expressions, including assignment and update targets
//! - `stmt.rs` executes statements, records events and runs the loop guard
//!
//! Evaluation recurses on the native stack; every recursive entry goes
//! through `ensure_sufficient_stack` so deeply nested trees grow the stack
//! instead of overflowing it.

mod builder;
mod expr;
mod stmt;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::Serialize;
use stepwise_ir::Program;
use tracing::debug;

pub use builder::InterpreterBuilder;

use crate::config::TraceConfig;
use crate::environment::Environment;
use crate::errors::{ErrorDescriptor, EvalError};
use crate::history::{History, HistoryEvent};
use crate::value::Snapshot;

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub history: Vec<HistoryEvent>,
    /// Every binding at the end of the run, ordered by name.
    pub variables: BTreeMap<String, Snapshot>,
}

/// Outcome of a failed run: the error and the history up to it.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceFailure {
    pub error: EvalError,
    pub history: Vec<HistoryEvent>,
}

impl TraceFailure {
    pub fn descriptor(&self) -> ErrorDescriptor {
        self.error.descriptor()
    }
}

/// Tracing interpreter for one run.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) history: History,
    pub(crate) config: TraceConfig,
}

impl Interpreter {
    /// Interpreter with the default configuration.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Execute `program` and return its history and final variables.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn run(mut self, program: &Program) -> Result<Trace, TraceFailure> {
        match self.exec_block(&program.body) {
            Ok(()) => {
                debug!(events = self.history.len(), "trace finished");
                Ok(Trace {
                    variables: self.env.snapshot(),
                    history: self.history.into_events(),
                })
            }
            Err(error) => {
                debug!(events = self.history.len(), %error, "trace failed");
                Err(TraceFailure {
                    error,
                    history: self.history.into_events(),
                })
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `program` once with `config`.
pub fn trace_program(program: &Program, config: TraceConfig) -> Result<Trace, TraceFailure> {
    Interpreter::builder().config(config).build().run(program)
}
