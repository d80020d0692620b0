#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::builder::{array, at, ident, index, num};
use crate::span::Located;

fn loc(start: u32, end: u32) -> serde_json::Value {
    json!({ "start": { "line": start, "column": 0 }, "end": { "line": end, "column": 10 } })
}

fn decode_expr(node: serde_json::Value) -> Expr {
    serde_json::from_value(node).unwrap()
}

fn decode_stmt(node: serde_json::Value) -> Stmt {
    serde_json::from_value(node).unwrap()
}

#[test]
fn decodes_declaration_with_array_initializer() {
    let stmt = decode_stmt(json!({
        "type": "VariableDeclaration",
        "kind": "let",
        "loc": loc(1, 1),
        "range": [0, 18],
        "declarations": [{
            "type": "VariableDeclarator",
            "id": { "type": "Identifier", "name": "arr" },
            "init": {
                "type": "ArrayExpression",
                "elements": [
                    { "type": "Literal", "value": 3, "raw": "3" },
                    { "type": "Literal", "value": 1, "raw": "1" }
                ]
            }
        }]
    }));

    let Stmt::VariableDeclaration(decl) = &stmt else {
        panic!("expected declaration, got {stmt:?}");
    };
    assert_eq!(decl.kind, DeclarationKind::Let);
    assert_eq!(decl.declarations.len(), 1);
    assert_eq!(decl.declarations[0].id.as_identifier(), Some("arr"));
    assert_eq!(
        decl.declarations[0].init,
        Some(array([num(3.0), num(1.0)]))
    );
    assert_eq!(stmt.line(), Some(1));
}

#[test]
fn unknown_statement_decodes_as_unsupported() {
    let stmt = decode_stmt(json!({
        "type": "WhileStatement",
        "loc": loc(4, 6),
        "test": { "type": "Literal", "value": true },
        "body": { "type": "BlockStatement", "body": [] }
    }));

    assert_eq!(stmt.node_type(), "WhileStatement");
    assert!(matches!(stmt, Stmt::Unsupported(_)));
    assert_eq!(stmt.line(), Some(4));
    assert_eq!(stmt.end_line(), Some(6));
}

#[test]
fn unknown_expression_decodes_as_unsupported() {
    let expr = decode_expr(json!({ "type": "ThisExpression" }));
    assert_eq!(expr.node_type(), "ThisExpression");
    assert_eq!(expr.line(), None);
}

#[test]
fn missing_type_tag_is_a_decode_error() {
    let result: Result<Expr, _> = serde_json::from_value(json!({ "name": "x" }));
    assert!(result.is_err());
}

#[test]
fn known_node_missing_field_is_a_decode_error() {
    let result: Result<Expr, _> = serde_json::from_value(json!({
        "type": "BinaryExpression",
        "operator": "+",
        "left": { "type": "Identifier", "name": "x" }
    }));
    assert!(result.is_err());
}

#[test]
fn decodes_every_estree_binary_operator() {
    for (symbol, expected) in [
        ("+", BinaryOp::Add),
        ("%", BinaryOp::Mod),
        ("===", BinaryOp::StrictEq),
        ("!=", BinaryOp::NotEq),
        (">=", BinaryOp::GtEq),
        (">>>", BinaryOp::UShr),
        ("instanceof", BinaryOp::InstanceOf),
        ("**", BinaryOp::Pow),
    ] {
        let expr = decode_expr(json!({
            "type": "BinaryExpression",
            "operator": symbol,
            "left": { "type": "Identifier", "name": "a" },
            "right": { "type": "Identifier", "name": "b" }
        }));
        let Expr::Binary(binary) = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(binary.operator, expected);
        assert_eq!(binary.operator.as_symbol(), symbol);
    }
}

#[test]
fn decodes_literal_values() {
    let Expr::Literal(lit) = decode_expr(json!({ "type": "Literal", "value": 2.5 })) else {
        panic!("expected literal");
    };
    assert_eq!(lit.value, LiteralValue::Number(2.5));

    let Expr::Literal(lit) = decode_expr(json!({ "type": "Literal", "value": false })) else {
        panic!("expected literal");
    };
    assert_eq!(lit.value, LiteralValue::Boolean(false));

    let Expr::Literal(lit) = decode_expr(json!({ "type": "Literal", "value": null })) else {
        panic!("expected literal");
    };
    assert_eq!(lit.value, LiteralValue::Null);

    let Expr::Literal(lit) = decode_expr(json!({
        "type": "Literal",
        "value": {},
        "regex": { "pattern": "a+", "flags": "g" }
    })) else {
        panic!("expected literal");
    };
    assert_eq!(lit.regex.unwrap().pattern, "a+");
}

#[test]
fn decodes_for_statement_with_expression_init_and_no_test() {
    let stmt = decode_stmt(json!({
        "type": "ForStatement",
        "loc": loc(2, 4),
        "init": {
            "type": "AssignmentExpression",
            "operator": "=",
            "left": { "type": "Identifier", "name": "i" },
            "right": { "type": "Literal", "value": 0 }
        },
        "test": null,
        "update": {
            "type": "UpdateExpression",
            "operator": "++",
            "prefix": false,
            "argument": { "type": "Identifier", "name": "i" },
            "loc": loc(2, 2)
        },
        "body": { "type": "BlockStatement", "body": [] }
    }));

    let Stmt::For(for_stmt) = &stmt else {
        panic!("expected for statement");
    };
    assert!(matches!(for_stmt.init, Some(ForInit::Expression(Expr::Assignment(_)))));
    assert!(for_stmt.test.is_none());
    assert_eq!(for_stmt.update.as_ref().and_then(|update| update.line()), Some(2));
    assert_eq!(stmt.end_line(), Some(4));
    assert!(for_stmt.body.as_body().is_empty());
}

#[test]
fn decodes_member_expressions() {
    let expr = decode_expr(json!({
        "type": "MemberExpression",
        "computed": true,
        "object": { "type": "Identifier", "name": "arr" },
        "property": { "type": "Identifier", "name": "j" }
    }));
    assert_eq!(expr, index(ident("arr"), ident("j")));

    let (name, property) = expr.as_element_access().unwrap();
    assert_eq!(name, "arr");
    assert_eq!(property.as_identifier(), Some("j"));

    let length = decode_expr(json!({
        "type": "MemberExpression",
        "computed": false,
        "object": { "type": "Identifier", "name": "arr" },
        "property": { "type": "Identifier", "name": "length" }
    }));
    assert!(length.as_element_access().is_none());
}

#[test]
fn parses_program_text() {
    let program = parse_program_json(
        r#"{
            "type": "Program",
            "sourceType": "script",
            "body": [
                { "type": "EmptyStatement", "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 1 } } },
                { "type": "DebuggerStatement" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(program.body.len(), 2);
    assert_eq!(program.body[0].node_type(), "EmptyStatement");
    assert_eq!(program.body[1].node_type(), "DebuggerStatement");
    assert!(parse_program_json("{ not json").is_err());
}

#[test]
fn parses_deeply_nested_program_text() {
    const DEPTH: usize = 1_000;

    // `((0 + 1) + 1) + ...` as a single left-leaning chain.
    let one = r#"{ "type": "Literal", "value": 1 }"#;
    let mut chain = r#"{ "type": "Literal", "value": 0 }"#.to_string();
    for _ in 0..DEPTH {
        chain = format!(
            r#"{{ "type": "BinaryExpression", "operator": "+", "left": {chain}, "right": {one} }}"#
        );
    }
    // The chain sits inside blocks nested almost as deep.
    let mut stmt = format!(r#"{{ "type": "ExpressionStatement", "expression": {chain} }}"#);
    for _ in 0..DEPTH / 4 {
        stmt = format!(r#"{{ "type": "BlockStatement", "body": [{stmt}] }}"#);
    }
    let text = format!(r#"{{ "type": "Program", "body": [{stmt}] }}"#);

    let program = parse_program_json(&text).unwrap();

    let mut node = &program.body[0];
    let mut blocks = 0;
    while let Stmt::Block(block) = node {
        blocks += 1;
        node = &block.body[0];
    }
    assert_eq!(blocks, DEPTH / 4);

    let Stmt::Expression(statement) = node else {
        panic!("expected expression statement, got {node:?}");
    };
    let mut expr = &statement.expression;
    let mut additions = 0;
    while let Expr::Binary(binary) = expr {
        assert_eq!(binary.operator, BinaryOp::Add);
        additions += 1;
        expr = &binary.left;
    }
    assert_eq!(additions, DEPTH);
    assert_eq!(expr, &num(0.0));
}

#[test]
fn at_sets_expression_line() {
    let expr = at(ident("i"), 7);
    assert_eq!(expr.line(), Some(7));
}
