//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch. Arithmetic and relational operators convert
//! both operands with `ToNumber` first and then follow IEEE-754, so `x / 0`
//! is an infinity and any comparison involving NaN is false.

use stepwise_ir::{AssignOp, BinaryOp, LogicalOp};

use crate::errors::{unsupported_operator, EvalResult};
use crate::value::Value;

/// Evaluate a binary operation on two already evaluated operands.
///
/// `&&` and `||` arriving here have had both sides evaluated; the result is
/// the deciding operand, as with the short-circuit forms.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod => Ok(Value::Number(eval_arithmetic(
            left.to_number(),
            right.to_number(),
            op,
        ))),

        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => Ok(Value::Boolean(
            eval_relational(left.to_number(), right.to_number(), op),
        )),

        BinaryOp::StrictEq => Ok(Value::Boolean(strict_equals(left, right))),
        BinaryOp::StrictNotEq => Ok(Value::Boolean(!strict_equals(left, right))),
        BinaryOp::Eq => Ok(Value::Boolean(loose_equals(left, right))),
        BinaryOp::NotEq => Ok(Value::Boolean(!loose_equals(left, right))),

        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }.clone()),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }.clone()),

        BinaryOp::Pow
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::UShr
        | BinaryOp::In
        | BinaryOp::InstanceOf => Err(unsupported_operator(op.as_symbol())),
    }
}

/// Whether [`evaluate_binary`] implements `op`.
pub const fn is_supported_binary(op: BinaryOp) -> bool {
    !matches!(
        op,
        BinaryOp::Pow
            | BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr
            | BinaryOp::UShr
            | BinaryOp::In
            | BinaryOp::InstanceOf
    )
}

/// `??` is the only logical operator without an implementation.
pub const fn is_supported_logical(op: LogicalOp) -> bool {
    !matches!(op, LogicalOp::Coalesce)
}

/// `=` and the arithmetic compound assignments.
pub const fn is_supported_assign(op: AssignOp) -> bool {
    matches!(
        op,
        AssignOp::Assign
            | AssignOp::AddAssign
            | AssignOp::SubAssign
            | AssignOp::MulAssign
            | AssignOp::DivAssign
            | AssignOp::ModAssign
    )
}

/// `+ - * / %` on numbers. Only called with arithmetic operators.
pub(crate) fn eval_arithmetic(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        // Truncated remainder, sign of the dividend.
        BinaryOp::Mod => a % b,
        _ => f64::NAN,
    }
}

fn eval_relational(a: f64, b: f64, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        _ => false,
    }
}

/// Same type and same value; arrays compare by identity.
fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
        (Value::Undefined, Value::Undefined) => true,
        _ => false,
    }
}

/// `==`: `undefined` only equals `undefined`; two arrays compare by
/// identity; every other pairing compares numerically.
fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Undefined, _) | (_, Value::Undefined) => false,
        (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
        _ => left.to_number() == right.to_number(),
    }
}
