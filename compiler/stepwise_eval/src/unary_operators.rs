//! Unary and update operator implementations for the evaluator.

use stepwise_ir::{UnaryOp, UpdateOp};

use crate::errors::{unsupported_operator, EvalResult};
use crate::value::Value;

/// Evaluate a unary operation.
///
/// `-` and `+` convert with `ToNumber`; `!` negates truthiness.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => Ok(Value::Number(-value.to_number())),
        UnaryOp::Plus => Ok(Value::Number(value.to_number())),
        UnaryOp::Not => Ok(Value::Boolean(!value.is_truthy())),
        UnaryOp::BitNot | UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete => {
            Err(unsupported_operator(op.as_symbol()))
        }
    }
}

/// Whether [`evaluate_unary`] implements `op`.
pub const fn is_supported_unary(op: UnaryOp) -> bool {
    matches!(op, UnaryOp::Neg | UnaryOp::Plus | UnaryOp::Not)
}

/// The value an update expression writes back: `ToNumber(old) ± 1`.
pub fn apply_update(old: &Value, op: UpdateOp) -> Value {
    let n = old.to_number();
    Value::Number(match op {
        UpdateOp::Increment => n + 1.0,
        UpdateOp::Decrement => n - 1.0,
    })
}
