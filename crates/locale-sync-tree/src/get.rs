use crate::types::{KeyPath, Node, Object};

/// Outcome of walking a key-path through a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The path resolves to a node (which may be an explicit null).
    Found(&'a Node),
    /// Some segment is absent, or a null sits where an object is needed.
    Missing,
    /// A non-null scalar at segment `at` stops the walk before the last segment.
    Blocked { at: usize },
}

impl<'a> Lookup<'a> {
    pub fn found(self) -> Option<&'a Node> {
        match self {
            Lookup::Found(node) => Some(node),
            Lookup::Missing | Lookup::Blocked { .. } => None,
        }
    }
}

/// Walk `path` from `root`, reporting why the walk stopped if it did.
pub fn lookup<'a>(root: &'a Object, path: &KeyPath) -> Lookup<'a> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Lookup::Missing;
    };

    let mut current = root;
    for (idx, step) in parents.iter().enumerate() {
        match current.get(step) {
            Some(Node::Object(map)) => current = map,
            Some(node) if node.is_null() => return Lookup::Missing,
            Some(Node::Scalar(_)) => return Lookup::Blocked { at: idx },
            None => return Lookup::Missing,
        }
    }
    match current.get(last) {
        Some(node) => Lookup::Found(node),
        None => Lookup::Missing,
    }
}

/// Get the node at `path`, or `None` if any segment is missing or a
/// non-object sits where a deeper segment is required.
pub fn get<'a>(root: &'a Object, path: &KeyPath) -> Option<&'a Node> {
    lookup(root, path).found()
}

/// Get a mutable reference to the node at `path`.
pub fn get_mut<'a>(root: &'a mut Object, path: &KeyPath) -> Option<&'a mut Node> {
    let (last, parents) = path.segments().split_last()?;

    let mut current = root;
    for step in parents {
        current = current.get_mut(step)?.as_object_mut()?;
    }
    current.get_mut(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Document;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        Document::try_from(value).unwrap()
    }

    #[test]
    fn test_get_nested() {
        let d = doc(json!({"a": {"b": {"c": "Hello"}}}));
        assert_eq!(
            get(d.root(), &KeyPath::parse("a.b.c")),
            Some(&Node::Scalar(json!("Hello")))
        );
        assert!(get(d.root(), &KeyPath::parse("a.b")).unwrap().is_object());
    }

    #[test]
    fn test_get_missing_segment() {
        let d = doc(json!({"a": {"b": 1}}));
        assert_eq!(get(d.root(), &KeyPath::parse("a.x")), None);
        assert_eq!(get(d.root(), &KeyPath::parse("x.b")), None);
    }

    #[test]
    fn test_get_through_scalar() {
        let d = doc(json!({"a": "text"}));
        assert_eq!(get(d.root(), &KeyPath::parse("a.b")), None);
        assert_eq!(
            lookup(d.root(), &KeyPath::parse("a.b.c")),
            Lookup::Blocked { at: 0 }
        );
    }

    #[test]
    fn test_get_explicit_null() {
        let d = doc(json!({"a": null}));
        let found = lookup(d.root(), &KeyPath::parse("a"));
        assert_eq!(found, Lookup::Found(&Node::Scalar(Value::Null)));
        assert!(found.found().unwrap().is_null());

        // A null parent behaves like a missing one.
        assert_eq!(lookup(d.root(), &KeyPath::parse("a.b")), Lookup::Missing);
    }

    #[test]
    fn test_get_empty_path() {
        let d = doc(json!({"a": 1}));
        assert_eq!(get(d.root(), &KeyPath::root()), None);
    }

    #[test]
    fn test_get_array_is_leaf() {
        let d = doc(json!({"a": [{"b": 1}]}));
        assert_eq!(
            lookup(d.root(), &KeyPath::parse("a.0")),
            Lookup::Blocked { at: 0 }
        );
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut d = doc(json!({"a": {"b": 1}}));
        let path = KeyPath::parse("a.b");
        *get_mut(d.root_mut(), &path).unwrap() = Node::Scalar(json!(2));
        assert_eq!(Value::from(d), json!({"a": {"b": 2}}));
    }
}
