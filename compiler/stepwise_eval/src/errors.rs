//! Error types for trace evaluation.
//!
//! `EvalErrorKind` is the typed category; factory functions (e.g.
//! `undefined_variable()`) are the public way to build an error and populate
//! both `kind` and `message`. The interpreter attaches the failing node and
//! its line as the error propagates outward; the innermost location wins.

use serde::Serialize;
use thiserror::Error;

use crate::value::{format_number, Value};

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("'{name}' is not an array")]
    UndefinedArray { name: String },

    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("index {} out of bounds for '{array}' (length {length})", format_number(*.index))]
    IndexOutOfBounds {
        array: String,
        index: f64,
        length: usize,
    },

    #[error("unsupported operator: {operator}")]
    UnsupportedOperator { operator: String },

    #[error("unsupported node type: {node_type}")]
    UnsupportedNodeType { node_type: String },

    #[error("no property '{property}' on {type_name}")]
    UndefinedProperty {
        property: String,
        type_name: &'static str,
    },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// ESTree `type` of the innermost node that was executing.
    pub node_type: Option<String>,
    /// Source line of the innermost located node that was executing.
    pub line: Option<u32>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            node_type: None,
            line: None,
        }
    }

    /// Attach the failing node unless a more specific one is already set.
    #[must_use]
    pub fn at_node(mut self, node_type: &str, line: Option<u32>) -> Self {
        if self.node_type.is_none() {
            self.node_type = Some(node_type.to_string());
        }
        self.or_line(line)
    }

    /// Attach a line unless one is already set.
    #[must_use]
    pub fn or_line(mut self, line: Option<u32>) -> Self {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }

    /// The boundary-facing form of this error.
    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor {
            message: self.message.clone(),
            failing_node_type: self.node_type.clone(),
            line: self.line,
        }
    }
}

/// `{ message, failingNodeType, line }` as reported to callers of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    pub message: String,
    pub failing_node_type: Option<String>,
    pub line: Option<u32>,
}

// Factory functions

/// Read of a name that was never bound.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Element access or swap on a name that is unbound or not an array.
#[cold]
pub fn undefined_array(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedArray {
        name: name.to_string(),
    })
}

/// Call of a name outside the built-in table.
#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(array: &str, index: f64, length: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        array: array.to_string(),
        index,
        length,
    })
}

#[cold]
pub fn unsupported_operator(operator: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperator {
        operator: operator.to_string(),
    })
}

#[cold]
pub fn unsupported_node_type(node_type: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedNodeType {
        node_type: node_type.to_string(),
    })
}

/// Non-computed member access other than `.length` on an array.
#[cold]
pub fn undefined_property(property: &str, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProperty {
        property: property.to_string(),
        type_name: value.type_name(),
    })
}
