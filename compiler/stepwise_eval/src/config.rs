//! Per-run tracing configuration.

use crate::history::HistoryPolicy;

/// Default maximum number of body executions per `for`-loop execution.
pub const DEFAULT_ITERATION_CAP: u32 = 1000;

/// Policy knobs for one trace run.
///
/// Nothing here is global; each interpreter owns its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceConfig {
    /// Body executions after which a `for` loop is stopped with an
    /// `iteration-cap` loop end.
    pub iteration_cap: u32,
    /// Which events the history keeps.
    pub history_policy: HistoryPolicy,
    /// Whether `if` consequents are scanned for the temp-variable swap idiom.
    pub swap_detection: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            iteration_cap: DEFAULT_ITERATION_CAP,
            history_policy: HistoryPolicy::KeepAll,
            swap_detection: true,
        }
    }
}

impl TraceConfig {
    #[must_use]
    pub fn with_iteration_cap(mut self, cap: u32) -> Self {
        self.iteration_cap = cap;
        self
    }

    #[must_use]
    pub fn with_history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.history_policy = policy;
        self
    }

    #[must_use]
    pub fn with_swap_detection(mut self, enabled: bool) -> Self {
        self.swap_detection = enabled;
        self
    }
}
