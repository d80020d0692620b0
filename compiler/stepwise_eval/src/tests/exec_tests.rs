//! Statement execution and the events it records.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serde_json::json;
use stepwise_ir::ast::{DeclarationKind, VariableDeclaration, VariableDeclarator};
use stepwise_ir::builder::{
    array, assign, binary, block, boolean, call, declaration, empty, expr_stmt, ident, if_stmt,
    index, let_decl, num, program, unsupported_expr, unsupported_stmt,
};
use stepwise_ir::{BinaryOp, SourceLocation, Stmt};

use super::actions;
use crate::errors::EvalErrorKind;
use crate::history::HistoryPolicy;
use crate::interpreter::Interpreter;
use crate::value::Snapshot;

#[test]
fn declarations_record_deep_copies() {
    let trace = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "a", array([num(3.0), num(1.0)])),
            expr_stmt(2, assign(index(ident("a"), num(0.0)), num(9.0))),
        ]))
        .unwrap();

    let json = serde_json::to_value(&trace.history).unwrap();
    assert_eq!(
        json,
        json!([
            {
                "line": 1,
                "action": "declare-variable",
                "details": { "variableName": "a", "initialValue": [3, 1] }
            },
            {
                "line": 2,
                "action": "assign",
                "details": { "arrayName": "a", "index": 0, "value": 9, "arrayState": [9, 1] }
            }
        ])
    );
    assert_eq!(trace.variables["a"], Snapshot::from(vec![9.0, 1.0]));
}

#[test]
fn declaration_without_initializer_binds_undefined() {
    let trace = Interpreter::new()
        .run(&program(vec![Stmt::VariableDeclaration(declaration(
            1,
            vec![("x", None), ("y", Some(num(2.0)))],
        ))]))
        .unwrap();

    assert_eq!(actions(&trace.history), vec!["declare-variable", "declare-variable"]);
    assert_eq!(trace.variables["x"], Snapshot::Undefined);
    assert_eq!(
        serde_json::to_value(&trace.history[0].details).unwrap(),
        json!({ "variableName": "x", "initialValue": null })
    );
}

#[test]
fn redeclaration_overwrites() {
    let trace = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "x", num(1.0)),
            let_decl(2, "x", boolean(true)),
        ]))
        .unwrap();
    assert_eq!(trace.variables["x"], Snapshot::Boolean(true));
}

#[test]
fn destructuring_declarator_is_unsupported() {
    let decl = Stmt::VariableDeclaration(VariableDeclaration {
        declarations: vec![VariableDeclarator {
            id: unsupported_expr("ArrayPattern"),
            init: Some(array([num(1.0)])),
            loc: None,
        }],
        kind: DeclarationKind::Const,
        loc: Some(SourceLocation::line(3)),
    });
    let failure = Interpreter::new().run(&program(vec![decl])).unwrap_err();
    assert_eq!(
        failure.error.kind,
        EvalErrorKind::UnsupportedNodeType {
            node_type: "ArrayPattern".to_string()
        }
    );
    assert_eq!(failure.error.node_type.as_deref(), Some("ArrayPattern"));
    assert_eq!(failure.error.line, Some(3));
}

#[test]
fn plain_assignment_records_variable() {
    let trace = Interpreter::new()
        .run(&program(vec![expr_stmt(4, assign(ident("t"), num(2.0)))]))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&trace.history).unwrap(),
        json!([{ "line": 4, "action": "assign", "details": { "variableName": "t", "value": 2 } }])
    );
}

#[test]
fn other_expression_statements_record_nothing() {
    let trace = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "x", num(1.0)),
            expr_stmt(2, binary(BinaryOp::Add, ident("x"), num(1.0))),
            empty(3),
        ]))
        .unwrap();
    assert_eq!(actions(&trace.history), vec!["declare-variable"]);
}

#[test]
fn if_records_test_and_takes_branch() {
    let run = |x: f64| {
        Interpreter::new()
            .run(&program(vec![
                let_decl(1, "x", num(x)),
                if_stmt(
                    2,
                    binary(BinaryOp::Gt, ident("x"), num(0.0)),
                    block(vec![expr_stmt(3, assign(ident("sign"), num(1.0)))]),
                    Some(expr_stmt(5, assign(ident("sign"), num(-1.0)))),
                ),
            ]))
            .unwrap()
    };

    let positive = run(4.0);
    assert_eq!(positive.history[1].line, Some(2));
    assert_eq!(
        serde_json::to_value(&positive.history[1].details).unwrap(),
        json!({ "testResult": true })
    );
    assert_eq!(positive.variables["sign"], Snapshot::Number(1.0));

    let negative = run(-4.0);
    assert_eq!(negative.variables["sign"], Snapshot::Number(-1.0));
    assert_eq!(negative.history[2].line, Some(5));
}

#[test]
fn explicit_swap_call_records_swap_events_only() {
    let trace = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "a", array([num(3.0), num(1.0)])),
            expr_stmt(2, call("swap", vec![ident("a"), num(0.0), num(1.0), num(2.0)])),
        ]))
        .unwrap();
    assert_eq!(actions(&trace.history), vec!["declare-variable", "swap"]);
    assert_eq!(trace.variables["a"], Snapshot::from(vec![1.0, 3.0]));
}

#[test]
fn out_of_bounds_read_keeps_prior_history() {
    let failure = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "a", array([num(1.0), num(2.0), num(3.0)])),
            expr_stmt(2, index(ident("a"), num(5.0))),
        ]))
        .unwrap_err();

    assert!(matches!(
        failure.error.kind,
        EvalErrorKind::IndexOutOfBounds { length: 3, .. }
    ));
    assert_eq!(actions(&failure.history), vec!["declare-variable"]);
    assert_eq!(
        serde_json::to_value(failure.descriptor()).unwrap(),
        json!({
            "message": "index 5 out of bounds for 'a' (length 3)",
            "failingNodeType": "MemberExpression",
            "line": 2
        })
    );
}

#[test]
fn unsupported_statement_fails_with_its_type() {
    let failure = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "x", num(0.0)),
            unsupported_stmt(2, "WhileStatement"),
            let_decl(3, "y", num(0.0)),
        ]))
        .unwrap_err();

    assert_eq!(failure.error.message, "unsupported node type: WhileStatement");
    assert_eq!(failure.error.node_type.as_deref(), Some("WhileStatement"));
    assert_eq!(failure.error.line, Some(2));
    assert_eq!(failure.history.len(), 1);
}

#[test]
fn statement_line_used_when_expression_has_none() {
    let failure = Interpreter::new()
        .run(&program(vec![expr_stmt(7, ident("missing"))]))
        .unwrap_err();
    assert_eq!(failure.error.node_type.as_deref(), Some("Identifier"));
    assert_eq!(failure.error.line, Some(7));
}

#[test]
fn dedup_policy_drops_consecutive_duplicates() {
    let body = vec![
        expr_stmt(2, assign(ident("x"), num(1.0))),
        expr_stmt(2, assign(ident("x"), num(1.0))),
        expr_stmt(2, assign(ident("x"), num(2.0))),
    ];

    let all = Interpreter::new().run(&program(body.clone())).unwrap();
    assert_eq!(all.history.len(), 3);

    let dedup = Interpreter::builder()
        .history_policy(HistoryPolicy::SkipConsecutiveDuplicates)
        .build()
        .run(&program(body))
        .unwrap();
    assert_eq!(dedup.history.len(), 2);
}

#[test]
fn final_variables_are_sorted() {
    let trace = Interpreter::new()
        .run(&program(vec![
            let_decl(1, "zeta", num(1.0)),
            let_decl(2, "alpha", num(2.0)),
        ]))
        .unwrap();
    let names: Vec<_> = trace.variables.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
