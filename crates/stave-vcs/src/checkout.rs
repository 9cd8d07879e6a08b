//! The delta-by-delta checkout loop.
//!
//! Every entity's `reset_state_to` has the same shape: walk the foreign
//! item's deltas in declaration order, fetch `(kind, payload)`, and hand
//! each pair to a local dispatch routine. This module owns that loop so the
//! shape stays identical across entity types; the dispatch itself stays in
//! the entity, which is the only place that knows its kinds.
//!
//! The loop is deliberately not transactional: a payload that fails to
//! decode at index `i` leaves deltas `0..i` applied. A checkout is itself a
//! historical operation, so entities must apply every delta with history
//! recording suppressed. Dependent derived state (beat ranges) is
//! recomputed by the entity once after the loop, not per delta.

use stave_state::StateNode;
use tracing::debug;

use crate::error::VcsResult;
use crate::tracked::TrackedItem;

/// Drive `apply` over every `(kind, payload)` pair `other` declares, in
/// declaration order.
///
/// `apply` is the entity's dispatch table; it panics on a kind it has no
/// arm for (contract violation) and returns an error only for payloads
/// that fail to decode.
pub fn reset_from<F>(other: &dyn TrackedItem, mut apply: F) -> VcsResult<()>
where
    F: FnMut(&str, &StateNode) -> VcsResult<()>,
{
    for index in 0..other.delta_count() {
        let delta = other.delta(index);
        let data = other.delta_data(index);
        debug!(index, kind = delta.kind(), source = %other.uuid(), "applying delta");
        apply(delta.kind(), &data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::Delta;
    use crate::error::VcsError;
    use stave_state::StateError;
    use uuid::Uuid;

    /// Minimal tracked item: fixed records, no live state behind them.
    struct StubItem {
        uuid: Uuid,
        records: Vec<(Delta, StateNode)>,
    }

    impl StubItem {
        fn new(kinds: &[&str]) -> Self {
            Self {
                uuid: Uuid::now_v7(),
                records: kinds
                    .iter()
                    .map(|k| {
                        let data = StateNode::new(*k).with_property("delta", *k);
                        (Delta::new(*k), data)
                    })
                    .collect(),
            }
        }
    }

    impl TrackedItem for StubItem {
        fn uuid(&self) -> Uuid {
            self.uuid
        }

        fn vcs_name(&self) -> &str {
            "stub"
        }

        fn delta_count(&self) -> usize {
            self.records.len()
        }

        fn delta(&self, index: usize) -> Delta {
            self.records[index].0.clone()
        }

        fn delta_data(&self, index: usize) -> StateNode {
            self.records[index].1.clone()
        }

        fn reset_state_to(&mut self, _other: &dyn TrackedItem) -> VcsResult<()> {
            unimplemented!("stub is read-only")
        }
    }

    #[test]
    fn visits_every_delta_in_declaration_order() {
        let item = StubItem::new(&["path", "colour", "events-added"]);
        let mut seen = Vec::new();

        reset_from(&item, |kind, data| {
            assert!(data.has_tag(kind));
            seen.push(kind.to_string());
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec!["path", "colour", "events-added"]);
    }

    #[test]
    fn stops_at_first_decode_failure_leaving_earlier_deltas_applied() {
        let item = StubItem::new(&["path", "colour", "instrument"]);
        let mut applied = Vec::new();

        let result = reset_from(&item, |kind, _| {
            if kind == "colour" {
                return Err(VcsError::State(StateError::InvalidColour("#nope".into())));
            }
            applied.push(kind.to_string());
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(applied, vec!["path"]);
    }

    #[test]
    fn empty_item_is_a_no_op() {
        let item = StubItem::new(&[]);
        reset_from(&item, |_, _| panic!("must not be called")).unwrap();
    }
}
