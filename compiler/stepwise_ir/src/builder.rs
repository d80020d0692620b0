//! Helpers for constructing trees by hand.
//!
//! Used by tests and by embedders that produce trees without going through
//! JSON. Statement helpers take the line the statement starts on; expression
//! helpers produce location-less nodes unless wrapped in [`at`].
//!
//! ```text
//! // let a = [3, 1];   (line 1)
//! // a[0] = a[1];      (line 2)
//! program(vec![
//!     let_decl(1, "a", array([num(3.0), num(1.0)])),
//!     expr_stmt(2, assign(index(ident("a"), num(0.0)), index(ident("a"), num(1.0)))),
//! ])
//! ```

use crate::ast::{
    ArrayExpression, AssignOp, AssignmentExpression, BinaryExpression, BinaryOp, BlockStatement,
    CallExpression, ConditionalExpression, DeclarationKind, EmptyStatement, Expr,
    ExpressionStatement, ForInit, ForStatement, Identifier, IfStatement, Literal, LiteralValue,
    LogicalExpression, LogicalOp, MemberExpression, Program, Stmt, UnaryExpression, UnaryOp,
    UnsupportedNode, UpdateExpression, UpdateOp, VariableDeclaration, VariableDeclarator,
};
use crate::span::SourceLocation;

// Expressions

fn literal(value: LiteralValue) -> Expr {
    Expr::Literal(Literal {
        value,
        regex: None,
        loc: None,
    })
}

pub fn num(value: f64) -> Expr {
    literal(LiteralValue::Number(value))
}

pub fn boolean(value: bool) -> Expr {
    literal(LiteralValue::Boolean(value))
}

pub fn null() -> Expr {
    literal(LiteralValue::Null)
}

pub fn string(value: &str) -> Expr {
    literal(LiteralValue::String(value.to_string()))
}

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Identifier {
        name: name.to_string(),
        loc: None,
    })
}

pub fn binary(operator: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        loc: None,
    })
}

pub fn logical(operator: LogicalOp, left: Expr, right: Expr) -> Expr {
    Expr::Logical(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        loc: None,
    })
}

pub fn unary(operator: UnaryOp, argument: Expr) -> Expr {
    Expr::Unary(UnaryExpression {
        operator,
        argument: Box::new(argument),
        loc: None,
    })
}

fn update(operator: UpdateOp, prefix: bool, argument: Expr) -> Expr {
    Expr::Update(UpdateExpression {
        operator,
        argument: Box::new(argument),
        prefix,
        loc: None,
    })
}

/// `x++` / `x--`
pub fn postfix(operator: UpdateOp, argument: Expr) -> Expr {
    update(operator, false, argument)
}

/// `++x` / `--x`
pub fn prefix(operator: UpdateOp, argument: Expr) -> Expr {
    update(operator, true, argument)
}

/// `target = value`
pub fn assign(target: Expr, value: Expr) -> Expr {
    compound(AssignOp::Assign, target, value)
}

/// `target op= value`
pub fn compound(operator: AssignOp, target: Expr, value: Expr) -> Expr {
    Expr::Assignment(AssignmentExpression {
        operator,
        left: Box::new(target),
        right: Box::new(value),
        loc: None,
    })
}

pub fn array(elements: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Array(ArrayExpression {
        elements: elements.into_iter().map(Some).collect(),
        loc: None,
    })
}

/// `object[property]`
pub fn index(object: Expr, property: Expr) -> Expr {
    Expr::Member(MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed: true,
        loc: None,
    })
}

/// `object.name`
pub fn member(object: Expr, name: &str) -> Expr {
    Expr::Member(MemberExpression {
        object: Box::new(object),
        property: Box::new(ident(name)),
        computed: false,
        loc: None,
    })
}

pub fn call(callee: &str, arguments: Vec<Expr>) -> Expr {
    Expr::Call(CallExpression {
        callee: Box::new(ident(callee)),
        arguments,
        loc: None,
    })
}

pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::Conditional(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        loc: None,
    })
}

/// An expression of a kind the tracer does not model (`this`, arrow functions, ...).
pub fn unsupported_expr(node_type: &str) -> Expr {
    Expr::Unsupported(UnsupportedNode::new(node_type, None))
}

/// Attach a single-line location to an expression.
pub fn at(mut expr: Expr, line: u32) -> Expr {
    *expr.loc_mut() = Some(SourceLocation::line(line));
    expr
}

// Statements

pub fn declaration(line: u32, declarators: Vec<(&str, Option<Expr>)>) -> VariableDeclaration {
    VariableDeclaration {
        declarations: declarators
            .into_iter()
            .map(|(name, init)| VariableDeclarator {
                id: ident(name),
                init,
                loc: Some(SourceLocation::line(line)),
            })
            .collect(),
        kind: DeclarationKind::Let,
        loc: Some(SourceLocation::line(line)),
    }
}

/// `let name = init;`
pub fn let_decl(line: u32, name: &str, init: Expr) -> Stmt {
    Stmt::VariableDeclaration(declaration(line, vec![(name, Some(init))]))
}

pub fn expr_stmt(line: u32, expression: Expr) -> Stmt {
    Stmt::Expression(ExpressionStatement {
        expression,
        loc: Some(SourceLocation::line(line)),
    })
}

pub fn block(body: Vec<Stmt>) -> Stmt {
    Stmt::Block(BlockStatement { body, loc: None })
}

pub fn empty(line: u32) -> Stmt {
    Stmt::Empty(EmptyStatement {
        loc: Some(SourceLocation::line(line)),
    })
}

pub fn unsupported_stmt(line: u32, node_type: &str) -> Stmt {
    Stmt::Unsupported(UnsupportedNode::new(
        node_type,
        Some(SourceLocation::line(line)),
    ))
}

/// `if (test) consequent else alternate`; an unlocated test gets `line`.
pub fn if_stmt(line: u32, test: Expr, consequent: Stmt, alternate: Option<Stmt>) -> Stmt {
    let test = if has_loc(&test) { test } else { at(test, line) };
    Stmt::If(IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
        loc: Some(SourceLocation::line(line)),
    })
}

/// A `for` statement spanning `lines`; an unlocated update gets the first line.
pub fn for_loop(
    lines: (u32, u32),
    init: Option<ForInit>,
    test: Option<Expr>,
    update: Option<Expr>,
    body: Stmt,
) -> Stmt {
    let (start, end) = lines;
    let update = update.map(|u| if has_loc(&u) { u } else { at(u, start) });
    Stmt::For(ForStatement {
        init,
        test,
        update,
        body: Box::new(body),
        loc: Some(SourceLocation::lines(start, end)),
    })
}

/// `for (let name = init; ...)` header slot.
pub fn for_let(line: u32, name: &str, init: Expr) -> Option<ForInit> {
    Some(ForInit::Declaration(declaration(line, vec![(name, Some(init))])))
}

pub fn program(body: Vec<Stmt>) -> Program {
    Program::new(body)
}

fn has_loc(expr: &Expr) -> bool {
    crate::span::Located::loc(expr).is_some()
}
