//! Ordered record of the state changes of one trace run.
//!
//! Every event carries the source line it happened on, its kind and a
//! kind-specific details payload. Array-valued details are [`Snapshot`]s, so
//! nothing recorded can change after the fact.

use serde::Serialize;
use tracing::debug;

use crate::value::Snapshot;

/// The `action` tag of an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    DeclareVariable,
    LoopUpdate,
    LoopEnd,
    IfTest,
    Swap,
    Assign,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::DeclareVariable => "declare-variable",
            EventKind::LoopUpdate => "loop-update",
            EventKind::LoopEnd => "loop-end",
            EventKind::IfTest => "if-test",
            EventKind::Swap => "swap",
            EventKind::Assign => "assign",
        }
    }
}

/// Why a `for` loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopEndReason {
    /// The test evaluated falsy.
    Condition,
    /// The body ran as many times as the configured cap allows.
    IterationCap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclareVariable {
    pub variable_name: String,
    pub initial_value: Snapshot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopUpdate {
    pub variable_name: String,
    pub new_value: Snapshot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopEnd {
    pub reason: LoopEndReason,
    pub iterations: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IfTest {
    pub test_result: bool,
}

/// One half of an element exchange.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub array_name: String,
    pub index1: usize,
    pub index2: usize,
    pub array_state_after: Vec<Snapshot>,
}

/// Assignment to a plain name.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableAssign {
    pub variable_name: String,
    pub value: Snapshot,
}

/// Assignment to an array slot; `array_state` is the whole array afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAssign {
    pub array_name: String,
    pub index: usize,
    pub value: Snapshot,
    pub array_state: Vec<Snapshot>,
}

/// Kind-specific payload of an event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventDetails {
    DeclareVariable(DeclareVariable),
    LoopUpdate(LoopUpdate),
    LoopEnd(LoopEnd),
    IfTest(IfTest),
    Swap(Swap),
    VariableAssign(VariableAssign),
    ElementAssign(ElementAssign),
}

impl EventDetails {
    pub const fn kind(&self) -> EventKind {
        match self {
            EventDetails::DeclareVariable(_) => EventKind::DeclareVariable,
            EventDetails::LoopUpdate(_) => EventKind::LoopUpdate,
            EventDetails::LoopEnd(_) => EventKind::LoopEnd,
            EventDetails::IfTest(_) => EventKind::IfTest,
            EventDetails::Swap(_) => EventKind::Swap,
            EventDetails::VariableAssign(_) | EventDetails::ElementAssign(_) => EventKind::Assign,
        }
    }
}

macro_rules! impl_from_details {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EventDetails {
                fn from(details: $variant) -> Self {
                    EventDetails::$variant(details)
                }
            }
        )*
    };
}

impl_from_details!(
    DeclareVariable,
    LoopUpdate,
    LoopEnd,
    IfTest,
    Swap,
    VariableAssign,
    ElementAssign,
);

/// One recorded state change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEvent {
    pub line: Option<u32>,
    pub action: EventKind,
    pub details: EventDetails,
}

impl HistoryEvent {
    /// The action is derived from the details, so the two always agree.
    pub fn new(line: Option<u32>, details: impl Into<EventDetails>) -> Self {
        let details = details.into();
        HistoryEvent {
            line,
            action: details.kind(),
            details,
        }
    }
}

/// Which events the recorder keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Every event, in emission order.
    #[default]
    KeepAll,
    /// Drop an event fully equal to the one recorded just before it.
    SkipConsecutiveDuplicates,
}

/// Append-only event log.
#[derive(Clone, Debug, Default)]
pub struct History {
    events: Vec<HistoryEvent>,
    policy: HistoryPolicy,
}

impl History {
    pub fn new(policy: HistoryPolicy) -> Self {
        History {
            events: Vec::new(),
            policy,
        }
    }

    /// Append an event. Returns `false` if the policy dropped it.
    pub fn record(&mut self, line: Option<u32>, details: impl Into<EventDetails>) -> bool {
        let event = HistoryEvent::new(line, details);
        if self.policy == HistoryPolicy::SkipConsecutiveDuplicates
            && self.events.last() == Some(&event)
        {
            debug!(action = event.action.as_str(), ?line, "skipped duplicate event");
            return false;
        }
        debug!(action = event.action.as_str(), ?line, "recorded event");
        self.events.push(event);
        true
    }

    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<HistoryEvent> {
        self.events
    }
}
