//! Ordered item containers backing the structural deltas.
//!
//! A sequence owns its items and a cached beat range. The range is derived
//! state: bulk operations (checkout, deserialize) leave it stale on purpose
//! and recompute it once at the end, never per item.

use stave_state::{StateNode, StateResult};
use uuid::Uuid;

use crate::clip::Clip;

/// `"1 event"` / `"3 events"` style count strings for delta descriptions.
pub(crate) fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// A domain item that can live inside a [`Sequence`].
pub trait SequencedItem: Sized {
    /// Node tag this item serializes under.
    const TAG: &'static str;

    /// Stable identity, used for membership diffs.
    fn id(&self) -> Uuid;

    /// `(start, end)` beats this item spans.
    fn beat_span(&self) -> (f64, f64);

    fn serialize(&self) -> StateNode;

    fn deserialize(data: &StateNode) -> StateResult<Self>;
}

/// An ordered collection of sequenced items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence<T: SequencedItem> {
    items: Vec<T>,
    beat_range: (f64, f64),
}

/// A track's clip container. Same shape as an event sequence.
pub type Pattern = Sequence<Clip>;

impl<T: SequencedItem> Sequence<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            beat_range: (0.0, 0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion (document) order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Append an item. Does not touch the cached beat range.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove an item by id, returning it if present.
    pub fn remove_by_id(&mut self, id: Uuid) -> Option<T> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn contains_id(&self, id: Uuid) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    /// Ids in document order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|i| i.id()).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The cached `(first, last)` beat bound.
    pub fn beat_range(&self) -> (f64, f64) {
        self.beat_range
    }

    /// Recompute the cached beat range from the current items.
    pub fn update_beat_range(&mut self) {
        let mut range: Option<(f64, f64)> = None;
        for item in &self.items {
            let (start, end) = item.beat_span();
            range = Some(match range {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
        self.beat_range = range.unwrap_or((0.0, 0.0));
    }

    /// Serialize the full collection: one child per item, document order.
    pub fn serialize(&self, tag: &str) -> StateNode {
        let mut node = StateNode::new(tag);
        for item in &self.items {
            node.append_child(item.serialize());
        }
        node
    }

    /// Replace the collection from a serialized payload: clear, then
    /// deserialize every matching child in document order. The beat range
    /// is left stale; the caller recomputes it once afterwards.
    pub fn deserialize(&mut self, data: &StateNode) -> StateResult<()> {
        self.items.clear();
        for child in data.children_with_tag(T::TAG) {
            self.items.push(T::deserialize(child)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AutomationEvent;

    #[test]
    fn insert_and_remove_by_id() {
        let mut seq = Sequence::new();
        let event = AutomationEvent::new(1.0, 0.5);
        let id = event.id();
        seq.insert(event);

        assert_eq!(seq.len(), 1);
        assert!(seq.contains_id(id));
        assert!(seq.remove_by_id(id).is_some());
        assert!(seq.is_empty());
        assert!(seq.remove_by_id(id).is_none());
    }

    #[test]
    fn beat_range_recomputed_on_demand_only() {
        let mut seq = Sequence::new();
        seq.insert(AutomationEvent::new(4.0, 0.1));
        seq.insert(AutomationEvent::new(1.0, 0.2));
        assert_eq!(seq.beat_range(), (0.0, 0.0));

        seq.update_beat_range();
        assert_eq!(seq.beat_range(), (1.0, 4.0));

        seq.clear();
        seq.update_beat_range();
        assert_eq!(seq.beat_range(), (0.0, 0.0));
    }

    #[test]
    fn deserialize_replaces_contents_in_document_order() {
        let mut source = Sequence::new();
        source.insert(AutomationEvent::new(2.0, 0.3));
        source.insert(AutomationEvent::new(3.0, 0.7));
        let node = source.serialize("events-added");

        let mut target: Sequence<AutomationEvent> = Sequence::new();
        target.insert(AutomationEvent::new(9.0, 0.9));
        target.deserialize(&node).unwrap();

        assert_eq!(target.ids(), source.ids());
        assert_eq!(target.items(), source.items());
    }

    #[test]
    fn foreign_children_are_ignored_on_deserialize() {
        let node = StateNode::new("events-added")
            .with_child(StateNode::new("marker"))
            .with_child(AutomationEvent::new(1.0, 0.5).serialize());

        let mut seq: Sequence<AutomationEvent> = Sequence::new();
        seq.deserialize(&node).unwrap();
        assert_eq!(seq.len(), 1);
    }
}
