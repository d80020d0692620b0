//! Tag dispatch shared by the statement and expression decoders.

use std::fmt;

use serde::de::{Error as _, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use stepwise_stack::ensure_sufficient_stack;

use crate::span::{Located, SourceLocation};

/// Raw JSON for one node, read with a stack check at every nesting level.
///
/// `serde_json::Value` recurses once per level with no check of its own, and
/// both the text parse and each node's field decode pass through it. Deep
/// operator chains would otherwise overflow the thread stack.
pub struct JsonNode(pub serde_json::Value);

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonNodeVisitor).map(JsonNode)
    }
}

struct JsonNodeVisitor;

impl<'de> Visitor<'de> for JsonNodeVisitor {
    type Value = serde_json::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Self::Value, E> {
        Ok(serde_json::Value::from(n))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Self::Value, E> {
        Ok(serde_json::Value::from(n))
    }

    fn visit_f64<E>(self, n: f64) -> Result<Self::Value, E> {
        let number = serde_json::Number::from_f64(n);
        Ok(number.map_or(serde_json::Value::Null, serde_json::Value::Number))
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E> {
        Ok(serde_json::Value::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> Result<Self::Value, E> {
        Ok(serde_json::Value::String(s))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        JsonNode::deserialize(deserializer).map(|node| node.0)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut elements = Vec::new();
        while let Some(JsonNode(element)) = ensure_sufficient_stack(|| seq.next_element())? {
            elements.push(element);
        }
        Ok(serde_json::Value::Array(elements))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let JsonNode(value) = ensure_sufficient_stack(|| map.next_value())?;
            object.insert(key, value);
        }
        Ok(serde_json::Value::Object(object))
    }
}

/// Read the `type` tag of an ESTree node.
pub(crate) fn node_type(node: &serde_json::Value) -> Result<String, serde_json::Error> {
    match node.get("type") {
        Some(serde_json::Value::String(kind)) => Ok(kind.clone()),
        Some(other) => Err(serde_json::Error::custom(format!(
            "node `type` must be a string, found {other}"
        ))),
        None => Err(serde_json::Error::missing_field("type")),
    }
}

/// A node whose `type` lies outside the supported subset.
///
/// Keeps the tag and location so the failure can name the construct and
/// point at its line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedNode {
    pub node_type: String,
    pub loc: Option<SourceLocation>,
}

impl UnsupportedNode {
    pub fn new(node_type: impl Into<String>, loc: Option<SourceLocation>) -> Self {
        UnsupportedNode {
            node_type: node_type.into(),
            loc,
        }
    }

    pub(crate) fn from_json(node_type: String, node: &serde_json::Value) -> Self {
        // A malformed `loc` on a node we will never run is not worth failing the decode over.
        let loc = node
            .get("loc")
            .and_then(|loc| SourceLocation::deserialize(loc).ok());
        UnsupportedNode { node_type, loc }
    }
}

impl Located for UnsupportedNode {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}
