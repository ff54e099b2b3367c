use crate::types::{KeyPath, Node, Object};
use crate::PathError;

/// Assign `value` at `path`, creating intermediate objects on the way.
///
/// Any intermediate segment that is missing or holds a non-object value is
/// replaced by an empty object. Returns the node previously stored at the
/// final segment.
pub fn set(root: &mut Object, path: &KeyPath, value: Node) -> Result<Option<Node>, PathError> {
    let (last, parents) = path.segments().split_last().ok_or(PathError::EmptyPath)?;

    let mut current = root;
    for step in parents {
        let slot = current
            .entry(step.clone())
            .or_insert_with(Node::empty_object);
        if !slot.is_object() {
            *slot = Node::empty_object();
        }
        current = match slot {
            Node::Object(map) => map,
            Node::Scalar(_) => unreachable!(),
        };
    }
    Ok(current.insert(last.clone(), value))
}
