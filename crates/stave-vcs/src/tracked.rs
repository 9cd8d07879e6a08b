//! The capability every versionable entity implements.

use stave_state::StateNode;
use uuid::Uuid;

use crate::delta::Delta;
use crate::error::VcsResult;

/// An entity participating in the delta versioning model.
///
/// Implementations declare a fixed, ordered set of delta kinds at
/// construction. Diff and checkout align items positionally: two items of
/// the same entity type must declare identical kind sets in identical
/// order, and every declared kind must have exactly one serialize arm (in
/// [`Self::delta_data`]) and one reset arm (reachable from
/// [`Self::reset_state_to`]).
///
/// # Panics
///
/// `delta` and `delta_data` panic on an out-of-range index, and
/// `delta_data` panics on a declared kind with no serialize arm. Both are
/// contract violations between entity type definitions, not runtime
/// conditions.
pub trait TrackedItem {
    /// Stable identity of this item across revisions.
    fn uuid(&self) -> Uuid;

    /// Display name used by history UIs. Never used for dispatch.
    fn vcs_name(&self) -> &str;

    /// Number of declared delta placeholders. Pure, O(1).
    fn delta_count(&self) -> usize;

    /// The delta record at `index`, its description refreshed from live
    /// state. Impure by contract: implementations may re-count contained
    /// items on every call.
    fn delta(&self, index: usize) -> Delta;

    /// Serialize the payload for the delta at `index`, dispatching on its
    /// kind.
    fn delta_data(&self, index: usize) -> StateNode;

    /// Check this item out to `other`'s state: for every delta `other`
    /// declares, decode its payload and apply it locally. Kinds absent from
    /// `other` are left untouched.
    ///
    /// Not atomic: a payload that fails to decode partway through leaves
    /// earlier deltas applied. Callers needing rollback should
    /// [`crate::SnapshotItem::capture`] first and reset back on failure.
    fn reset_state_to(&mut self, other: &dyn TrackedItem) -> VcsResult<()>;
}
