//! The delta record: one named, independently serializable unit of state.

use serde::{Deserialize, Serialize};
use stave_state::StateNode;

/// A single versioned facet of a tracked item.
///
/// The `kind` is fixed at construction and drives all dispatch. The
/// `description` is a derived display string the owning item refreshes from
/// live state on every [`crate::TrackedItem::delta`] access, so callers must
/// not assume it stays stable across mutations. The payload starts empty
/// (placeholder) and is filled on demand, or carried populated inside a
/// [`crate::Changeset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    kind: String,
    description: String,
    data: StateNode,
}

impl Delta {
    /// Create an empty-payload placeholder for `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let data = StateNode::new(kind.clone());
        Self {
            kind,
            description: String::new(),
            data,
        }
    }

    /// Builder-style description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style payload.
    pub fn with_data(mut self, data: StateNode) -> Self {
        self.data = data;
        self
    }

    /// The stable kind identifier. Dispatch on this, never display it.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns `true` if this delta carries `kind`.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Human-readable summary of the delta's current content.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// The serialized payload.
    pub fn data(&self) -> &StateNode {
        &self.data
    }

    pub fn set_data(&mut self, data: StateNode) {
        self.data = data;
    }

    /// Consume the record, yielding its payload.
    pub fn into_data(self) -> StateNode {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_starts_empty_with_kind_tag() {
        let delta = Delta::new("colour");
        assert_eq!(delta.kind(), "colour");
        assert!(delta.has_kind("colour"));
        assert!(!delta.has_kind("path"));
        assert!(delta.description().is_empty());
        assert!(delta.data().has_tag("colour"));
        assert_eq!(delta.data().child_count(), 0);
    }

    #[test]
    fn kind_survives_payload_and_description_updates() {
        let mut delta = Delta::new("events-added").with_description("empty sequence");
        delta.set_description("3 events");
        delta.set_data(StateNode::new("events-added").with_child(StateNode::new("event")));

        assert_eq!(delta.kind(), "events-added");
        assert_eq!(delta.description(), "3 events");
        assert_eq!(delta.data().child_count(), 1);
    }
}
