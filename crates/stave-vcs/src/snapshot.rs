//! A frozen capture of a tracked item — the "foreign item" side of diffs
//! and checkouts.
//!
//! A snapshot is what a historical revision looks like to this layer: the
//! same item contract, but backed by captured payloads instead of live
//! domain state. Capturing before a checkout is also the supported rollback
//! path, since checkouts are not atomic.

use stave_state::StateNode;
use uuid::Uuid;

use crate::delta::Delta;
use crate::error::VcsResult;
use crate::tracked::TrackedItem;

/// An immutable-by-convention tracked item holding captured deltas.
#[derive(Clone, Debug)]
pub struct SnapshotItem {
    uuid: Uuid,
    name: String,
    records: Vec<(Delta, StateNode)>,
}

impl SnapshotItem {
    /// Capture every delta and payload `item` currently exposes.
    pub fn capture(item: &dyn TrackedItem) -> Self {
        let records = (0..item.delta_count())
            .map(|i| (item.delta(i), item.delta_data(i)))
            .collect();
        Self {
            uuid: item.uuid(),
            name: item.vcs_name().to_string(),
            records,
        }
    }
}

impl TrackedItem for SnapshotItem {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn vcs_name(&self) -> &str {
        &self.name
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

    /// Re-capture from `other`. Snapshots have no live state to mutate, so
    /// checking one out just replaces its captured records.
    fn reset_state_to(&mut self, other: &dyn TrackedItem) -> VcsResult<()> {
        *self = Self::capture(other);
        Ok(())
    }
}
