//! Backfilling a target document with the reference's values.

use locale_sync_tree::{get, lookup, set, Document, KeyPath, Lookup};
use tracing::{debug, trace};

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Paths written with the reference value, in reference order.
    pub backfilled: Vec<KeyPath>,
    /// Paths left alone because the target holds a non-null, non-object value
    /// on the way to them. Only the top-most path of each blocked subtree is
    /// listed.
    pub conflicts: Vec<KeyPath>,
}

impl Reconciliation {
    pub fn modified(&self) -> bool {
        !self.backfilled.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.backfilled.len()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Bring `target` up to the reference's key set.
///
/// Every path in `reference_keys` that is absent or `null` in `target` is set
/// to the reference's value, unless the reference value is itself `null`.
/// Existing non-null target values are never changed, and keys that only the
/// target has are left untouched.
///
/// Explicit `null` in the target counts as missing, so a translator cannot
/// clear a key by nulling it out.
pub fn reconcile(reference_keys: &[KeyPath], reference: &Document, target: &mut Document) -> Reconciliation {
    let mut out = Reconciliation::default();

    for key in reference_keys {
        match lookup(target.root(), key) {
            Lookup::Found(node) if !node.is_null() => continue,
            Lookup::Blocked { at } => {
                let covered = out.conflicts.last().is_some_and(|c| key.starts_with(c));
                if !covered {
                    debug!(key = %key, blocked_at = %key.prefix(at + 1), "shape conflict");
                    out.conflicts.push(key.clone());
                }
                continue;
            }
            Lookup::Found(_) | Lookup::Missing => {}
        }

        let value = match get(reference.root(), key) {
            Some(node) if !node.is_null() => node.clone(),
            _ => {
                trace!(key = %key, "reference value is null, nothing to backfill");
                continue;
            }
        };
        // Enumerated paths always have at least one segment.
        if set(target.root_mut(), key, value).is_ok() {
            debug!(key = %key, "backfilled");
            out.backfilled.push(key.clone());
        }
    }

    out
}
