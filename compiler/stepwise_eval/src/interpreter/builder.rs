//! `InterpreterBuilder` for creating Interpreter instances.

use super::Interpreter;
use crate::config::TraceConfig;
use crate::environment::Environment;
use crate::history::{History, HistoryPolicy};

/// Builder for creating Interpreter instances.
///
/// ```text
/// let trace = Interpreter::builder()
///     .iteration_cap(50)
///     .swap_detection(false)
///     .build()
///     .run(&program)?;
/// ```
#[derive(Default)]
pub struct InterpreterBuilder {
    config: TraceConfig,
    env: Option<Environment>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn iteration_cap(mut self, cap: u32) -> Self {
        self.config.iteration_cap = cap;
        self
    }

    #[must_use]
    pub fn history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.config.history_policy = policy;
        self
    }

    #[must_use]
    pub fn swap_detection(mut self, enabled: bool) -> Self {
        self.config.swap_detection = enabled;
        self
    }

    /// Start from pre-populated bindings instead of an empty environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: self.env.unwrap_or_default(),
            history: History::new(self.config.history_policy),
            config: self.config,
        }
    }
}
