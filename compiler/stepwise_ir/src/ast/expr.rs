//! Expression nodes.

use serde::Deserialize;

use stepwise_stack::ensure_sufficient_stack;

use super::decode::{node_type, JsonNode, UnsupportedNode};
use super::operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};
use crate::span::{Located, SourceLocation};

/// An expression node.
///
/// Decoded from an ESTree object by its `type` tag. Tags outside the
/// supported subset decode to [`Expr::Unsupported`] and fail only if the
/// evaluator reaches them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "JsonNode")]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Assignment(AssignmentExpression),
    Array(ArrayExpression),
    Member(MemberExpression),
    Call(CallExpression),
    Conditional(ConditionalExpression),
    Unsupported(UnsupportedNode),
}

impl Expr {
    /// The ESTree `type` tag of this node.
    pub fn node_type(&self) -> &str {
        match self {
            Expr::Literal(_) => "Literal",
            Expr::Identifier(_) => "Identifier",
            Expr::Binary(_) => "BinaryExpression",
            Expr::Logical(_) => "LogicalExpression",
            Expr::Unary(_) => "UnaryExpression",
            Expr::Update(_) => "UpdateExpression",
            Expr::Assignment(_) => "AssignmentExpression",
            Expr::Array(_) => "ArrayExpression",
            Expr::Member(_) => "MemberExpression",
            Expr::Call(_) => "CallExpression",
            Expr::Conditional(_) => "ConditionalExpression",
            Expr::Unsupported(node) => &node.node_type,
        }
    }

    /// The identifier name, if this is a plain `Identifier`.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// `(object name, index)` if this is a computed access on an identifier (`a[i]`).
    pub fn as_element_access(&self) -> Option<(&str, &Expr)> {
        match self {
            Expr::Member(member) if member.computed => member
                .object
                .as_identifier()
                .map(|name| (name, member.property.as_ref())),
            _ => None,
        }
    }

    pub fn loc_mut(&mut self) -> &mut Option<SourceLocation> {
        match self {
            Expr::Literal(e) => &mut e.loc,
            Expr::Identifier(e) => &mut e.loc,
            Expr::Binary(e) => &mut e.loc,
            Expr::Logical(e) => &mut e.loc,
            Expr::Unary(e) => &mut e.loc,
            Expr::Update(e) => &mut e.loc,
            Expr::Assignment(e) => &mut e.loc,
            Expr::Array(e) => &mut e.loc,
            Expr::Member(e) => &mut e.loc,
            Expr::Call(e) => &mut e.loc,
            Expr::Conditional(e) => &mut e.loc,
            Expr::Unsupported(e) => &mut e.loc,
        }
    }
}

impl Located for Expr {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Expr::Literal(e) => e.loc.as_ref(),
            Expr::Identifier(e) => e.loc.as_ref(),
            Expr::Binary(e) => e.loc.as_ref(),
            Expr::Logical(e) => e.loc.as_ref(),
            Expr::Unary(e) => e.loc.as_ref(),
            Expr::Update(e) => e.loc.as_ref(),
            Expr::Assignment(e) => e.loc.as_ref(),
            Expr::Array(e) => e.loc.as_ref(),
            Expr::Member(e) => e.loc.as_ref(),
            Expr::Call(e) => e.loc.as_ref(),
            Expr::Conditional(e) => e.loc.as_ref(),
            Expr::Unsupported(e) => e.loc.as_ref(),
        }
    }
}

impl TryFrom<JsonNode> for Expr {
    type Error = serde_json::Error;

    fn try_from(JsonNode(node): JsonNode) -> Result<Self, Self::Error> {
        ensure_sufficient_stack(|| {
            let kind = node_type(&node)?;
            match kind.as_str() {
                "Literal" => serde_json::from_value(node).map(Expr::Literal),
                "Identifier" => serde_json::from_value(node).map(Expr::Identifier),
                "BinaryExpression" => serde_json::from_value(node).map(Expr::Binary),
                "LogicalExpression" => serde_json::from_value(node).map(Expr::Logical),
                "UnaryExpression" => serde_json::from_value(node).map(Expr::Unary),
                "UpdateExpression" => serde_json::from_value(node).map(Expr::Update),
                "AssignmentExpression" => serde_json::from_value(node).map(Expr::Assignment),
                "ArrayExpression" => serde_json::from_value(node).map(Expr::Array),
                "MemberExpression" => serde_json::from_value(node).map(Expr::Member),
                "CallExpression" => serde_json::from_value(node).map(Expr::Call),
                "ConditionalExpression" => serde_json::from_value(node).map(Expr::Conditional),
                _ => Ok(Expr::Unsupported(UnsupportedNode::from_json(kind, &node))),
            }
        })
    }
}

/// The value of a `Literal` node.
///
/// Regex and bigint literals carry `null` or an opaque object here and a
/// separate `regex`/`bigint` member; those land in `Other`.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Other(serde_json::Value),
}

/// The `regex` member of a regular-expression literal.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegexLiteral {
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: LiteralValue,
    #[serde(default)]
    pub regex: Option<RegexLiteral>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LogicalExpression {
    pub operator: LogicalOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOp,
    pub argument: Box<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpdateExpression {
    pub operator: UpdateOp,
    pub argument: Box<Expr>,
    /// `++i` when true, `i++` when false.
    pub prefix: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssignmentExpression {
    pub operator: AssignOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArrayExpression {
    /// `None` marks a hole (`[1, , 3]`).
    pub elements: Vec<Option<Expr>>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

/// `object.property` or `object[property]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub computed: bool,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}
