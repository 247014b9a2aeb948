//! Decoded instance data.
//!
//! Object, list and scalar nodes are distinct variants, so the walker never
//! has to infer "is this associative" from key shapes.

use serde_json::{Number, Value};

/// Leaf value. Its content is never inspected by the consistency walk.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A node of the instance tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    /// Properties in document order.
    Object(Vec<(String, Instance)>),
    List(Vec<Instance>),
    Scalar(Scalar),
}

impl Instance {
    /// Parse a JSON document, keeping object keys in document order.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Instance::Object(_) | Instance::List(_))
    }

    /// Nesting depth: scalars and empty containers are 0, each enclosing
    /// container adds 1.
    pub fn depth(&self) -> usize {
        match self {
            Instance::Scalar(_) => 0,
            Instance::Object(entries) => entries
                .iter()
                .map(|(_, child)| child.depth() + 1)
                .max()
                .unwrap_or(0),
            Instance::List(items) => items
                .iter()
                .map(|child| child.depth() + 1)
                .max()
                .unwrap_or(0),
        }
    }
}

impl From<Value> for Instance {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Instance::Scalar(Scalar::Null),
            Value::Bool(b) => Instance::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Instance::Scalar(Scalar::Number(n)),
            Value::String(s) => Instance::Scalar(Scalar::String(s)),
            Value::Array(items) => Instance::List(items.into_iter().map(Instance::from).collect()),
            Value::Object(map) => Instance::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Instance::from(child)))
                    .collect(),
            ),
        }
    }
}
