//! Ordered document trees addressed by dot-delimited key-paths.
//!
//! A [`Document`] is a tree of [`Node`]s whose root is always an object.
//! Nodes are addressed by [`KeyPath`]s such as `"home.menu.open"`.
//!
//! # Example
//!
//! ```
//! use locale_sync_tree::{enumerate_keys, get, set, Document, KeyPath, Node};
//! use serde_json::json;
//!
//! let mut doc = Document::try_from(json!({"a": {"b": "Hello"}})).unwrap();
//!
//! let keys: Vec<String> = enumerate_keys(doc.root()).iter().map(|k| k.to_string()).collect();
//! assert_eq!(keys, vec!["a", "a.b"]);
//!
//! let path = KeyPath::parse("a.c");
//! assert_eq!(get(doc.root(), &path), None);
//!
//! set(doc.root_mut(), &path, Node::Scalar(json!("World"))).unwrap();
//! assert_eq!(get(doc.root(), &path), Some(&Node::Scalar(json!("World"))));
//! ```

use thiserror::Error;

pub mod get;
pub mod keys;
pub mod set;
pub mod types;

pub use get::{get, get_mut, lookup, Lookup};
pub use keys::enumerate_keys;
pub use set::set;
pub use types::{Document, KeyPath, Node, NotAnObject, Object, KEY_PATH_DELIMITER};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("key-path has no segments")]
    EmptyPath,
}
