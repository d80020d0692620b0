//! Syntax tree for the traced subset.
//!
//! The node shapes follow ESTree, the JSON format emitted by JavaScript
//! parsers such as esprima or acorn. Only the fields the tracer reads are
//! modelled; everything else on a node (`range`, `raw`, `sourceType`, ...) is
//! ignored during decoding.
//!
//! Every node kind is a closed enum with an explicit `Unsupported` variant, so
//! adding a construct is a compile-checked change in both decoder and
//! evaluator.

mod decode;
mod expr;
mod operators;
mod stmt;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use stepwise_stack::ensure_sufficient_stack;

use crate::span::{Located, SourceLocation};

pub use decode::UnsupportedNode;
pub use expr::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression,
    ConditionalExpression, Expr, Identifier, Literal, LiteralValue, LogicalExpression,
    MemberExpression, RegexLiteral, UnaryExpression, UpdateExpression,
};
pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};
pub use stmt::{
    BlockStatement, DeclarationKind, EmptyStatement, ExpressionStatement, ForInit, ForStatement,
    IfStatement, Stmt, VariableDeclaration, VariableDeclarator,
};

/// Root of a tree.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Program { body, loc: None }
    }
}

impl Located for Program {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}

/// Decode a `Program` from ESTree JSON text.
///
/// Fails on malformed JSON or a known node missing a required field; unknown
/// node kinds decode as `Unsupported`. Nesting depth is bounded only by
/// memory: the parser's recursion limit is off and every node level checks
/// the remaining stack.
pub fn parse_program_json(text: &str) -> Result<Program, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let program = ensure_sufficient_stack(|| Program::deserialize(&mut deserializer))?;
    deserializer.end()?;
    Ok(program)
}
