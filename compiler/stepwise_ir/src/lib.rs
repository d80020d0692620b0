//! Stepwise IR - syntax tree model for the stepwise tracer.
//!
//! The tracer never parses source text. It consumes the ESTree JSON that a
//! JavaScript parser emits with location tracking enabled and decodes it into
//! the closed enums of [`ast`].
//!
//! - [`ast`]: statement/expression nodes, operators, `parse_program_json`
//! - [`span`]: ESTree `loc` positions and the [`Located`] trait
//! - [`visitor`]: read-only traversal
//! - [`builder`]: hand construction of trees

pub mod ast;
pub mod builder;
pub mod span;
pub mod visitor;

pub use ast::{
    parse_program_json, AssignOp, BinaryOp, Expr, ForInit, ForStatement, IfStatement, LiteralValue,
    LogicalOp, Program, Stmt, UnaryOp, UpdateOp, VariableDeclaration,
};
pub use span::{Located, Position, SourceLocation};
pub use visitor::Visitor;
