//! Type definitions for document trees and key-paths.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Delimiter used to join key-path segments.
pub const KEY_PATH_DELIMITER: char = '.';

/// An ordered mapping from keys to child nodes.
pub type Object = IndexMap<String, Node>;

/// A node in a document tree.
///
/// Objects recurse; every other JSON value (arrays included) is an opaque
/// leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Any non-object JSON value.
    Scalar(Value),
    /// A nested mapping, in insertion order.
    Object(Object),
}

impl Node {
    pub fn empty_object() -> Self {
        Node::Object(Object::new())
    }

    /// `true` for an explicit JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Value::Null))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(map) => Some(map),
            Node::Scalar(_) => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Object(map) => Some(map),
            Node::Scalar(_) => None,
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Object(object_from_map(map)),
            other => Node::Scalar(other),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(value) => value,
            Node::Object(map) => Value::Object(map_from_object(map)),
        }
    }
}

fn object_from_map(map: Map<String, Value>) -> Object {
    map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()
}

fn map_from_object(object: Object) -> Map<String, Value> {
    object.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

/// Returned when a document is built from a JSON value that is not an object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("document root must be an object, found {found}")]
pub struct NotAnObject {
    pub found: &'static str,
}

/// A whole document: a tree whose root is always an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Object,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Object {
        &mut self.root
    }
}

impl From<Object> for Document {
    fn from(root: Object) -> Self {
        Self { root }
    }
}

impl TryFrom<Value> for Document {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self {
                root: object_from_map(map),
            }),
            other => Err(NotAnObject {
                found: value_kind(&other),
            }),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(map_from_object(doc.root))
    }
}

impl From<&Document> for Value {
    fn from(doc: &Document) -> Self {
        Value::from(doc.clone())
    }
}

/// The address of a node: the keys walked from the document root.
///
/// Rendered and parsed with [`KEY_PATH_DELIMITER`]. Segments are kept
/// separately so that keys containing the delimiter still resolve to the
/// node they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Split a dotted string into segments. `""` yields a single empty segment.
    pub fn parse(path: &str) -> Self {
        Self(path.split(KEY_PATH_DELIMITER).map(str::to_owned).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path one level deeper.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(key.into());
        Self(segments)
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// `true` if `other` is this path or one of its ancestors.
    pub fn starts_with(&self, other: &KeyPath) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{}", KEY_PATH_DELIMITER)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
