#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use stepwise_ir::builder::{
    assign, at, binary, boolean, call, compound, conditional, ident, index, logical,
    member, null, num, postfix, prefix, string, unary, unsupported_expr,
};
use stepwise_ir::{AssignOp, BinaryOp, Expr, LogicalOp, UnaryOp, UpdateOp};

use super::*;
use crate::errors::EvalErrorKind;
use crate::value::Value;

fn interp_with(bindings: &[(&str, Value)]) -> Interpreter {
    let mut env = Environment::new();
    for (name, value) in bindings {
        env.define(name, value.clone());
    }
    Interpreter::builder().env(env).build()
}

fn numbers(values: &[f64]) -> Value {
    Value::array(values.iter().copied().map(Value::Number).collect())
}

fn eval(interp: &mut Interpreter, expr: &Expr) -> Value {
    interp.eval_expr(expr).unwrap()
}

fn eval_err(interp: &mut Interpreter, expr: &Expr) -> EvalError {
    interp.eval_expr(expr).unwrap_err()
}

#[test]
fn test_literals() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, &num(2.5)), Value::Number(2.5));
    assert_eq!(eval(&mut interp, &boolean(true)), Value::Boolean(true));
    assert_eq!(eval(&mut interp, &null()), Value::Undefined);

    let err = eval_err(&mut interp, &string("hi"));
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedNodeType {
            node_type: "Literal(string)".to_string()
        }
    );
}

#[test]
fn test_identifiers() {
    let mut interp = interp_with(&[("x", Value::number(3))]);
    assert_eq!(eval(&mut interp, &ident("x")), Value::number(3));
    assert_eq!(eval(&mut interp, &ident("undefined")), Value::Undefined);
    assert!(eval(&mut interp, &ident("NaN")).to_number().is_nan());

    let err = eval_err(&mut interp, &at(ident("y"), 4));
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: "y".to_string() });
    assert_eq!(err.node_type.as_deref(), Some("Identifier"));
    assert_eq!(err.line, Some(4));
}

#[test]
fn test_binary_left_to_right() {
    // (i = 1) + (i = i * 10) evaluates the left side first.
    let mut interp = interp_with(&[("i", Value::number(0))]);
    let expr = binary(
        BinaryOp::Add,
        assign(ident("i"), num(1.0)),
        assign(ident("i"), binary(BinaryOp::Mul, ident("i"), num(10.0))),
    );
    assert_eq!(eval(&mut interp, &expr), Value::number(11));
    assert_eq!(interp.env.lookup("i"), Some(Value::number(10)));
}

#[test]
fn test_logical_short_circuits() {
    let mut interp = interp_with(&[("x", Value::number(0))]);
    let expr = logical(LogicalOp::And, boolean(false), assign(ident("x"), num(1.0)));
    assert_eq!(eval(&mut interp, &expr), Value::Boolean(false));
    assert_eq!(interp.env.lookup("x"), Some(Value::number(0)));

    let expr = logical(LogicalOp::Or, num(0.0), num(7.0));
    assert_eq!(eval(&mut interp, &expr), Value::number(7));

    let expr = logical(LogicalOp::Coalesce, num(0.0), num(7.0));
    assert!(matches!(
        eval_err(&mut interp, &expr).kind,
        EvalErrorKind::UnsupportedOperator { .. }
    ));
}

#[test]
fn test_unary() {
    let mut interp = interp_with(&[("x", Value::number(3))]);
    assert_eq!(eval(&mut interp, &unary(UnaryOp::Neg, ident("x"))), Value::number(-3));
    assert_eq!(eval(&mut interp, &unary(UnaryOp::Not, ident("x"))), Value::Boolean(false));
}

#[test]
fn test_update_prefix_and_postfix() {
    let mut interp = interp_with(&[("i", Value::number(5))]);
    assert_eq!(eval(&mut interp, &postfix(UpdateOp::Increment, ident("i"))), Value::number(5));
    assert_eq!(interp.env.lookup("i"), Some(Value::number(6)));

    let mut interp = interp_with(&[("i", Value::number(5))]);
    assert_eq!(eval(&mut interp, &prefix(UpdateOp::Increment, ident("i"))), Value::number(6));
    assert_eq!(interp.env.lookup("i"), Some(Value::number(6)));

    let mut interp = interp_with(&[("i", Value::number(5))]);
    assert_eq!(eval(&mut interp, &prefix(UpdateOp::Decrement, ident("i"))), Value::number(4));
}

#[test]
fn test_update_on_element() {
    let mut interp = interp_with(&[("a", numbers(&[1.0, 2.0]))]);
    let expr = postfix(UpdateOp::Increment, index(ident("a"), num(1.0)));
    assert_eq!(eval(&mut interp, &expr), Value::number(2));
    assert_eq!(interp.env.lookup("a"), Some(numbers(&[1.0, 3.0])));
}

#[test]
fn test_update_of_undeclared_name_fails() {
    let mut interp = Interpreter::new();
    let err = eval_err(&mut interp, &postfix(UpdateOp::Increment, ident("k")));
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: "k".to_string() });
}

#[test]
fn test_assignment_creates_and_returns() {
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, &assign(ident("t"), num(4.0))), Value::number(4));
    assert_eq!(interp.env.lookup("t"), Some(Value::number(4)));
}

#[test]
fn test_compound_assignment() {
    let mut interp = interp_with(&[("s", Value::number(10)), ("a", numbers(&[1.0]))]);
    eval(&mut interp, &compound(AssignOp::SubAssign, ident("s"), num(3.0)));
    assert_eq!(interp.env.lookup("s"), Some(Value::number(7)));

    eval(&mut interp, &compound(AssignOp::MulAssign, index(ident("a"), num(0.0)), num(5.0)));
    assert_eq!(interp.env.lookup("a"), Some(numbers(&[5.0])));

    let err = eval_err(&mut interp, &compound(AssignOp::ShlAssign, ident("s"), num(1.0)));
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperator {
            operator: "<<=".to_string()
        }
    );
    assert_eq!(interp.env.lookup("s"), Some(Value::number(7)));
}

#[test]
fn test_element_assignment_bounds() {
    let mut interp = interp_with(&[("a", numbers(&[1.0, 2.0, 3.0]))]);
    let err = eval_err(&mut interp, &assign(index(ident("a"), num(3.0)), num(0.0)));
    assert!(matches!(err.kind, EvalErrorKind::IndexOutOfBounds { length: 3, .. }));
    assert_eq!(interp.env.lookup("a"), Some(numbers(&[1.0, 2.0, 3.0])));

    let err = eval_err(&mut interp, &assign(index(ident("b"), num(0.0)), num(0.0)));
    assert_eq!(err.kind, EvalErrorKind::UndefinedArray { name: "b".to_string() });
}

#[test]
fn test_arrays_alias() {
    let mut interp = interp_with(&[("a", numbers(&[1.0, 2.0]))]);
    eval(&mut interp, &assign(ident("b"), ident("a")));
    eval(&mut interp, &assign(index(ident("b"), num(0.0)), num(9.0)));
    assert_eq!(interp.env.lookup("a"), Some(numbers(&[9.0, 2.0])));
}

#[test]
fn test_self_containing_array_in_arithmetic() {
    let mut interp = interp_with(&[("a", numbers(&[0.0]))]);
    eval(&mut interp, &assign(index(ident("a"), num(0.0)), ident("a")));

    assert_eq!(eval(&mut interp, &unary(UnaryOp::Neg, ident("a"))), Value::number(-0.0));
    assert_eq!(eval(&mut interp, &unary(UnaryOp::Plus, ident("a"))), Value::number(0));
    assert_eq!(
        eval(&mut interp, &binary(BinaryOp::Mul, ident("a"), num(1.0))),
        Value::number(0)
    );
    assert_eq!(
        eval(&mut interp, &binary(BinaryOp::Lt, ident("a"), num(1.0))),
        Value::Boolean(true)
    );
    assert_eq!(
        eval(&mut interp, &binary(BinaryOp::Eq, ident("a"), num(0.0))),
        Value::Boolean(true)
    );
}

#[test]
fn test_array_literal_and_holes() {
    let mut interp = interp_with(&[("x", Value::number(2))]);
    let expr = Expr::Array(stepwise_ir::ast::ArrayExpression {
        elements: vec![Some(num(1.0)), None, Some(ident("x"))],
        loc: None,
    });
    let value = eval(&mut interp, &expr);
    assert_eq!(value.to_string(), "[1, undefined, 2]");
}

#[test]
fn test_member_access() {
    let grid = Value::array(vec![numbers(&[1.0, 2.0]), numbers(&[3.0, 4.0])]);
    let mut interp = interp_with(&[("a", numbers(&[5.0, 6.0, 7.0])), ("grid", grid), ("n", Value::number(1))]);

    assert_eq!(eval(&mut interp, &member(ident("a"), "length")), Value::number(3));
    assert_eq!(eval(&mut interp, &index(ident("a"), ident("n"))), Value::number(6));
    assert_eq!(
        eval(&mut interp, &index(index(ident("grid"), num(1.0)), num(0.0))),
        Value::number(3)
    );

    let err = eval_err(&mut interp, &index(ident("a"), num(5.0)));
    assert_eq!(err.message, "index 5 out of bounds for 'a' (length 3)");

    let err = eval_err(&mut interp, &member(ident("a"), "size"));
    assert!(matches!(err.kind, EvalErrorKind::UndefinedProperty { .. }));

    let err = eval_err(&mut interp, &member(ident("n"), "length"));
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedProperty {
            property: "length".to_string(),
            type_name: "number"
        }
    );

    let err = eval_err(&mut interp, &index(ident("n"), num(0.0)));
    assert_eq!(err.kind, EvalErrorKind::UndefinedArray { name: "n".to_string() });
}

#[test]
fn test_nested_element_assignment_labels_array() {
    let grid = Value::array(vec![numbers(&[1.0, 2.0])]);
    let mut interp = interp_with(&[("grid", grid), ("i", Value::number(0))]);
    let target = index(index(ident("grid"), ident("i")), num(1.0));
    let Expr::Assignment(assignment) = assign(target, num(8.0)) else {
        panic!("expected assignment");
    };
    let written = interp.eval_assignment(&assignment).unwrap();
    let details = written.into_details();
    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "arrayName": "grid[i]", "index": 1, "value": 8, "arrayState": [1, 8] })
    );
}

#[test]
fn test_conditional() {
    let mut interp = interp_with(&[("x", Value::number(0))]);
    let expr = conditional(ident("x"), assign(ident("y"), num(1.0)), num(2.0));
    assert_eq!(eval(&mut interp, &expr), Value::number(2));
    assert_eq!(interp.env.get("y"), None);
}

#[test]
fn test_calls() {
    let mut interp = interp_with(&[("a", numbers(&[3.0, 1.0]))]);
    let expr = call("swap", vec![ident("a"), num(0.0), num(1.0), num(7.0), num(8.0)]);
    assert_eq!(eval(&mut interp, &expr), Value::Undefined);
    assert_eq!(interp.env.lookup("a"), Some(numbers(&[1.0, 3.0])));
    let lines: Vec<_> = interp.history.events().iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![Some(7), Some(8)]);

    let err = eval_err(&mut interp, &call("print", vec![num(1.0)]));
    assert_eq!(err.kind, EvalErrorKind::UndefinedFunction { name: "print".to_string() });
}

#[test]
fn test_swap_by_string_name_defaults_line() {
    let mut interp = interp_with(&[("a", numbers(&[3.0, 1.0]))]);
    let expr = at(call("swap", vec![string("a"), num(0.0), num(1.0)]), 12);
    eval(&mut interp, &expr);
    assert_eq!(interp.history.len(), 1);
    assert_eq!(interp.history.events()[0].line, Some(12));
}

#[test]
fn test_unsupported_expression() {
    let mut interp = Interpreter::new();
    let err = eval_err(&mut interp, &at(unsupported_expr("ThisExpression"), 2));
    assert_eq!(err.node_type.as_deref(), Some("ThisExpression"));
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_deeply_nested_expression() {
    let mut expr = num(0.0);
    for _ in 0..20_000 {
        expr = binary(BinaryOp::Add, expr, num(1.0));
    }
    let mut interp = Interpreter::new();
    assert_eq!(eval(&mut interp, &expr), Value::number(20_000));
    // Recursive drop of the tree can overflow too; leak it instead.
    std::mem::forget(expr);
}
