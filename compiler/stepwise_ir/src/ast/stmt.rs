//! Statement nodes.

use serde::Deserialize;

use stepwise_stack::ensure_sufficient_stack;

use super::decode::{node_type, JsonNode, UnsupportedNode};
use super::expr::Expr;
use crate::span::{Located, SourceLocation};

/// A statement node.
///
/// Same decoding rule as [`Expr`]: unknown tags become
/// [`Stmt::Unsupported`] instead of a decode error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "JsonNode")]
pub enum Stmt {
    VariableDeclaration(VariableDeclaration),
    For(ForStatement),
    If(IfStatement),
    Block(BlockStatement),
    Expression(ExpressionStatement),
    Empty(EmptyStatement),
    Unsupported(UnsupportedNode),
}

impl Stmt {
    /// The ESTree `type` tag of this node.
    pub fn node_type(&self) -> &str {
        match self {
            Stmt::VariableDeclaration(_) => "VariableDeclaration",
            Stmt::For(_) => "ForStatement",
            Stmt::If(_) => "IfStatement",
            Stmt::Block(_) => "BlockStatement",
            Stmt::Expression(_) => "ExpressionStatement",
            Stmt::Empty(_) => "EmptyStatement",
            Stmt::Unsupported(node) => &node.node_type,
        }
    }

    /// The statements to run for this node as a body: a block's children or
    /// the node itself.
    pub fn as_body(&self) -> &[Stmt] {
        match self {
            Stmt::Block(block) => &block.body,
            other => std::slice::from_ref(other),
        }
    }
}

impl Located for Stmt {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Stmt::VariableDeclaration(s) => s.loc.as_ref(),
            Stmt::For(s) => s.loc.as_ref(),
            Stmt::If(s) => s.loc.as_ref(),
            Stmt::Block(s) => s.loc.as_ref(),
            Stmt::Expression(s) => s.loc.as_ref(),
            Stmt::Empty(s) => s.loc.as_ref(),
            Stmt::Unsupported(s) => s.loc.as_ref(),
        }
    }
}

impl TryFrom<JsonNode> for Stmt {
    type Error = serde_json::Error;

    fn try_from(JsonNode(node): JsonNode) -> Result<Self, Self::Error> {
        ensure_sufficient_stack(|| {
            let kind = node_type(&node)?;
            match kind.as_str() {
                "VariableDeclaration" => serde_json::from_value(node).map(Stmt::VariableDeclaration),
                "ForStatement" => serde_json::from_value(node).map(Stmt::For),
                "IfStatement" => serde_json::from_value(node).map(Stmt::If),
                "BlockStatement" => serde_json::from_value(node).map(Stmt::Block),
                "ExpressionStatement" => serde_json::from_value(node).map(Stmt::Expression),
                "EmptyStatement" => serde_json::from_value(node).map(Stmt::Empty),
                _ => Ok(Stmt::Unsupported(UnsupportedNode::from_json(kind, &node))),
            }
        })
    }
}

/// `var`, `let` or `const`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Var,
    #[default]
    Let,
    Const,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub declarations: Vec<VariableDeclarator>,
    #[serde(default)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// One `name = init` entry of a declaration.
///
/// `id` is an expression node so that destructuring patterns decode (as
/// unsupported nodes) rather than failing the whole tree.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub id: Expr,
    #[serde(default)]
    pub init: Option<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// The `init` slot of a `for` header.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "JsonNode")]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expr),
}

impl TryFrom<JsonNode> for ForInit {
    type Error = serde_json::Error;

    fn try_from(JsonNode(node): JsonNode) -> Result<Self, Self::Error> {
        if node_type(&node)? == "VariableDeclaration" {
            ensure_sufficient_stack(|| serde_json::from_value(node).map(ForInit::Declaration))
        } else {
            Expr::try_from(JsonNode(node)).map(ForInit::Expression)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForStatement {
    #[serde(default)]
    pub init: Option<ForInit>,
    /// `None` loops until the iteration cap.
    #[serde(default)]
    pub test: Option<Expr>,
    #[serde(default)]
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IfStatement {
    pub test: Expr,
    pub consequent: Box<Stmt>,
    #[serde(default)]
    pub alternate: Option<Box<Stmt>>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expr,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmptyStatement {
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}
