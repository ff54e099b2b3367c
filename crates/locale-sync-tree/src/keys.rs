use crate::types::{KeyPath, Node, Object};

/// Every key-path reachable from `root`, depth-first and pre-order.
///
/// A key is emitted before any of its descendants, and siblings follow the
/// object's own key order.
pub fn enumerate_keys(root: &Object) -> Vec<KeyPath> {
    let mut keys = Vec::new();
    walk(root, &KeyPath::root(), &mut keys);
    keys
}

fn walk(object: &Object, prefix: &KeyPath, keys: &mut Vec<KeyPath>) {
    for (key, node) in object {
        let path = prefix.child(key.as_str());
        match node {
            Node::Object(child) => {
                keys.push(path.clone());
                walk(child, &path, keys);
            }
            Node::Scalar(_) => keys.push(path),
        }
    }
}
