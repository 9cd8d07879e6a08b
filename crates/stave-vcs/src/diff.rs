//! Changeset computation between two tracked items.
//!
//! A [`DiffLogic`] is bound to one live "owner" item and compares it against
//! an arbitrary foreign item, typically a [`crate::SnapshotItem`] of an
//! earlier revision. The comparison is read-only on both sides and
//! one-directional: the resulting [`Changeset`] describes what to apply to
//! the owner to reach the other item's state, not a symmetric distance.
//!
//! Scalar deltas compare by decoded value; structural (collection-valued)
//! deltas compare by child membership, keyed on an id property.

use stave_state::StateNode;
use tracing::debug;

use crate::delta::Delta;
use crate::error::{VcsError, VcsResult};
use crate::kinds;
use crate::tracked::TrackedItem;

/// Per-entity-type comparison strategy, bound 1:1 to an owner item.
pub trait DiffLogic {
    /// The entity type this logic knows how to compare. Diagnostic only.
    fn entity_type(&self) -> &'static str;

    /// Compare the bound owner against `other`, producing the deltas whose
    /// payloads differ. Empty when all compared deltas are equal. Mutates
    /// neither side.
    fn compute_changes(&self, other: &dyn TrackedItem) -> VcsResult<Changeset>;
}

/// An ordered list of differing delta records.
///
/// Ordering mirrors the declaration order of the deltas compared; a
/// structural delta may contribute up to two records (`*-added` and
/// `*-removed`) at its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changeset {
    /// The differing delta records, payloads populated.
    pub records: Vec<Delta>,
}

impl Changeset {
    /// Create an empty changeset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the compared states were identical.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of differing records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Append a record, keeping declaration order.
    pub fn push(&mut self, record: Delta) {
        self.records.push(record);
    }

    /// Iterate the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Delta> {
        self.records.iter()
    }
}

/// The membership difference between two collection-valued payloads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MembershipDiff {
    /// Children of `other` absent (by id) from the owner.
    pub added: Vec<StateNode>,
    /// Children of the owner absent (by id) from `other`.
    pub removed: Vec<StateNode>,
}

impl MembershipDiff {
    /// Returns `true` when both collections hold the same ids.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Fail with [`VcsError::MisalignedDeltas`] unless both sides declare the
/// same kind at `index`.
pub fn ensure_aligned(index: usize, owner_kind: &str, other_kind: &str) -> VcsResult<()> {
    if owner_kind == other_kind {
        Ok(())
    } else {
        Err(VcsError::MisalignedDeltas {
            index,
            owner_kind: owner_kind.to_string(),
            other_kind: other_kind.to_string(),
        })
    }
}

/// Compare two scalar payloads by their decoded `delta` property.
///
/// Value equality on the decoded JSON value covers strings and integers;
/// kinds with a canonical form of their own (colour) should decode further
/// before comparing.
pub fn scalar_changed(owner: &StateNode, other: &StateNode) -> VcsResult<bool> {
    let owner_value =
        owner
            .property(kinds::DELTA_PROP)
            .ok_or_else(|| stave_state::StateError::MissingProperty {
                name: kinds::DELTA_PROP.to_string(),
            })?;
    let other_value =
        other
            .property(kinds::DELTA_PROP)
            .ok_or_else(|| stave_state::StateError::MissingProperty {
                name: kinds::DELTA_PROP.to_string(),
            })?;
    Ok(owner_value != other_value)
}

/// Set-membership diff over the children of two collection payloads, keyed
/// on the `id_prop` property of each child.
///
/// `added` holds clones of `other`'s children missing from `owner`,
/// `removed` the inverse; child order follows each side's document order.
/// Children without the id property are malformed payloads.
pub fn diff_children_by_id(
    owner: &StateNode,
    other: &StateNode,
    id_prop: &str,
) -> VcsResult<MembershipDiff> {
    let owner_ids = child_ids(owner, id_prop)?;
    let other_ids = child_ids(other, id_prop)?;

    let mut diff = MembershipDiff::default();
    for (child, id) in other.children().iter().zip(&other_ids) {
        if !owner_ids.contains(id) {
            diff.added.push(child.clone());
        }
    }
    for (child, id) in owner.children().iter().zip(&owner_ids) {
        if !other_ids.contains(id) {
            diff.removed.push(child.clone());
        }
    }

    debug!(
        collection = owner.tag(),
        added = diff.added.len(),
        removed = diff.removed.len(),
        "membership diff"
    );
    Ok(diff)
}

fn child_ids(node: &StateNode, id_prop: &str) -> VcsResult<Vec<String>> {
    node.children()
        .iter()
        .map(|c| Ok(c.string_property(id_prop)?.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(tag: &str, ids: &[&str]) -> StateNode {
        let mut node = StateNode::new(tag);
        for id in ids {
            node.append_child(StateNode::new("event").with_property("id", *id));
        }
        node
    }

    #[test]
    fn identical_collections_yield_empty_diff() {
        let a = collection("events-added", &["e1", "e2"]);
        let diff = diff_children_by_id(&a, &a, "id").unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn membership_diff_is_one_directional() {
        let owner = collection("events-added", &["e1", "e2", "e3"]);
        let other = collection("events-added", &["e2", "e3", "e4"]);

        let diff = diff_children_by_id(&owner, &other, "id").unwrap();
        let added: Vec<&str> = diff
            .added
            .iter()
            .map(|c| c.string_property("id").unwrap())
            .collect();
        let removed: Vec<&str> = diff
            .removed
            .iter()
            .map(|c| c.string_property("id").unwrap())
            .collect();

        assert_eq!(added, vec!["e4"]);
        assert_eq!(removed, vec!["e1"]);
    }

    #[test]
    fn child_missing_id_is_a_malformed_payload() {
        let owner = collection("events-added", &["e1"]);
        let mut other = StateNode::new("events-added");
        other.append_child(StateNode::new("event"));

        let err = diff_children_by_id(&owner, &other, "id").unwrap_err();
        assert!(matches!(err, VcsError::State(_)));
    }

    #[test]
    fn scalar_change_detected_by_decoded_value() {
        let red = StateNode::new("colour").with_property("delta", "#FF0000");
        let green = StateNode::new("colour").with_property("delta", "#00FF00");

        assert!(!scalar_changed(&red, &red.clone()).unwrap());
        assert!(scalar_changed(&red, &green).unwrap());
    }

    #[test]
    fn scalar_payload_without_value_is_malformed() {
        let empty = StateNode::new("colour");
        let red = StateNode::new("colour").with_property("delta", "#FF0000");
        assert!(scalar_changed(&empty, &red).is_err());
    }

    #[test]
    fn misaligned_kinds_fail_loudly() {
        let err = ensure_aligned(2, "controller", "events-added").unwrap_err();
        assert_eq!(
            err,
            VcsError::MisalignedDeltas {
                index: 2,
                owner_kind: "controller".into(),
                other_kind: "events-added".into(),
            }
        );
        assert!(ensure_aligned(0, "path", "path").is_ok());
    }

    #[test]
    fn changeset_preserves_push_order() {
        let mut changeset = Changeset::new();
        assert!(changeset.is_empty());

        changeset.push(Delta::new("path"));
        changeset.push(Delta::new("events-added"));
        let kinds: Vec<&str> = changeset.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec!["path", "events-added"]);
        assert_eq!(changeset.len(), 2);
    }
}
