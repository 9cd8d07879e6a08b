//! Owner-bound diff logic for track entities.
//!
//! One diff instance is bound to one live track and compares it against any
//! foreign tracked item, usually a snapshot of an earlier revision. The
//! comparison never mutates either side. Scalar kinds compare by decoded
//! value — colour decodes to its canonical form first, so `#FF0000` and
//! `#FFFF0000` are equal — and structural kinds compare by child id
//! membership, emitting `*-added`/`*-removed` records.

use stave_state::{Colour, StateNode};
use stave_vcs::diff::ensure_aligned;
use stave_vcs::{diff_children_by_id, kinds, scalar_changed, Changeset, Delta};
use stave_vcs::{DiffLogic, TrackedItem, VcsResult};
use tracing::debug;

use crate::automation::AutomationTrack;
use crate::piano::PianoTrack;
use crate::sequence::counted;

/// Diff logic for [`AutomationTrack`].
pub struct AutomationTrackDiff<'a> {
    owner: &'a AutomationTrack,
}

impl<'a> AutomationTrackDiff<'a> {
    pub fn new(owner: &'a AutomationTrack) -> Self {
        Self { owner }
    }
}

impl DiffLogic for AutomationTrackDiff<'_> {
    fn entity_type(&self) -> &'static str {
        "automationTrack"
    }

    fn compute_changes(&self, other: &dyn TrackedItem) -> VcsResult<Changeset> {
        compute_track_changes(self.owner, other)
    }
}

/// Diff logic for [`PianoTrack`].
pub struct PianoTrackDiff<'a> {
    owner: &'a PianoTrack,
}

impl<'a> PianoTrackDiff<'a> {
    pub fn new(owner: &'a PianoTrack) -> Self {
        Self { owner }
    }
}

impl DiffLogic for PianoTrackDiff<'_> {
    fn entity_type(&self) -> &'static str {
        "pianoTrack"
    }

    fn compute_changes(&self, other: &dyn TrackedItem) -> VcsResult<Changeset> {
        compute_track_changes(self.owner, other)
    }
}

/// Shared per-index comparison over the track delta kinds.
///
/// Both track types dispatch by kind, so one routine serves them; the
/// per-index alignment check is what catches diffing across entity shapes.
fn compute_track_changes(
    owner: &dyn TrackedItem,
    other: &dyn TrackedItem,
) -> VcsResult<Changeset> {
    let mut changeset = Changeset::new();
    let shared = owner.delta_count().min(other.delta_count());

    for index in 0..shared {
        let owner_delta = owner.delta(index);
        let other_delta = other.delta(index);
        ensure_aligned(index, owner_delta.kind(), other_delta.kind())?;

        let owner_data = owner.delta_data(index);
        let other_data = other.delta_data(index);
        match owner_delta.kind() {
            kinds::TRACK_COLOUR => {
                let ours: Colour = owner_data.string_property(kinds::DELTA_PROP)?.parse()?;
                let theirs: Colour = other_data.string_property(kinds::DELTA_PROP)?.parse()?;
                if ours != theirs {
                    changeset.push(other_delta.with_data(other_data));
                }
            }
            kinds::TRACK_PATH | kinds::TRACK_INSTRUMENT | kinds::TRACK_CONTROLLER => {
                if scalar_changed(&owner_data, &other_data)? {
                    changeset.push(other_delta.with_data(other_data));
                }
            }
            kinds::EVENTS_ADDED => push_membership_records(
                &mut changeset,
                &owner_data,
                &other_data,
                kinds::EVENTS_ADDED,
                kinds::EVENTS_REMOVED,
                "event",
            )?,
            kinds::CLIPS_ADDED => push_membership_records(
                &mut changeset,
                &owner_data,
                &other_data,
                kinds::CLIPS_ADDED,
                kinds::CLIPS_REMOVED,
                "clip",
            )?,
            unknown => panic!("track diff has no arm for delta kind {unknown:?}"),
        }
    }

    debug!(
        owner = %owner.uuid(),
        other = %other.uuid(),
        changes = changeset.len(),
        "computed track changes"
    );
    Ok(changeset)
}

fn push_membership_records(
    changeset: &mut Changeset,
    owner_data: &StateNode,
    other_data: &StateNode,
    added_kind: &str,
    removed_kind: &str,
    noun: &str,
) -> VcsResult<()> {
    let membership = diff_children_by_id(owner_data, other_data, "id")?;

    if !membership.added.is_empty() {
        let mut data = StateNode::new(added_kind);
        let description = format!("{} added", counted(membership.added.len(), noun));
        for child in membership.added {
            data.append_child(child);
        }
        changeset.push(Delta::new(added_kind).with_description(description).with_data(data));
    }
    if !membership.removed.is_empty() {
        let mut data = StateNode::new(removed_kind);
        let description = format!("{} removed", counted(membership.removed.len(), noun));
        for child in membership.removed {
            data.append_child(child);
        }
        changeset.push(Delta::new(removed_kind).with_description(description).with_data(data));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clip;
    use crate::events::{AutomationEvent, Note};
    use stave_vcs::{SnapshotItem, VcsError};
    use uuid::Uuid;

    fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
        ids.sort();
        ids
    }

    #[test]
    fn identical_tracks_produce_an_empty_changeset() {
        let mut track = AutomationTrack::new("Pan");
        track.insert_event(AutomationEvent::new(1.0, 0.5));

        let changes = AutomationTrackDiff::new(&track)
            .compute_changes(&SnapshotItem::capture(&track))
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn colour_compares_canonically_not_textually() {
        let mut a = AutomationTrack::new("T");
        a.set_colour("#FF0000".parse().unwrap(), false);
        let mut b = AutomationTrack::new("T");
        b.set_colour("#FFFF0000".parse().unwrap(), false);

        let changes = AutomationTrackDiff::new(&a)
            .compute_changes(&SnapshotItem::capture(&b))
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn scalar_changes_carry_the_target_payload() {
        let a = AutomationTrack::new("Track A");
        let mut b = AutomationTrack::new("Track B");
        b.set_controller_number(74, true);

        let changes = AutomationTrackDiff::new(&a)
            .compute_changes(&SnapshotItem::capture(&b))
            .unwrap();
        let kinds_seen: Vec<&str> = changes.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds_seen, vec!["path", "controller"]);
        assert_eq!(
            changes.records[0].data().string_property("delta").unwrap(),
            "Track B"
        );
    }

    #[test]
    fn structural_diff_moves_owner_to_target_membership() {
        let e1 = AutomationEvent::new(1.0, 0.1);
        let e2 = AutomationEvent::new(2.0, 0.2);
        let e3 = AutomationEvent::new(3.0, 0.3);
        let e4 = AutomationEvent::new(4.0, 0.4);

        let mut a = AutomationTrack::new("T");
        for e in [&e1, &e2, &e3] {
            a.insert_event(e.clone());
        }
        let mut b = AutomationTrack::new("T");
        for e in [&e2, &e3, &e4] {
            b.insert_event(e.clone());
        }

        let changes = AutomationTrackDiff::new(&a)
            .compute_changes(&SnapshotItem::capture(&b))
            .unwrap();
        let kinds_seen: Vec<&str> = changes.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds_seen, vec!["events-added", "events-removed"]);
        assert_eq!(changes.records[0].description(), "1 event added");

        a.apply_changes(&changes).unwrap();
        assert_eq!(sorted(a.events().ids()), sorted(b.events().ids()));
        assert_eq!(a.events().beat_range(), (2.0, 4.0));
    }

    #[test]
    fn clip_membership_diffs_like_events() {
        let shared = Clip::new(0.0);
        let mut a = AutomationTrack::new("T");
        a.insert_clip(shared.clone());
        a.insert_clip(Clip::new(8.0));
        let mut b = AutomationTrack::new("T");
        b.insert_clip(shared);

        let changes = AutomationTrackDiff::new(&a)
            .compute_changes(&SnapshotItem::capture(&b))
            .unwrap();
        let kinds_seen: Vec<&str> = changes.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds_seen, vec!["clips-removed"]);

        a.apply_changes(&changes).unwrap();
        assert_eq!(sorted(a.pattern().ids()), sorted(b.pattern().ids()));
    }

    #[test]
    fn diffing_across_entity_shapes_fails_loudly() {
        let automation = AutomationTrack::new("A");
        let mut piano = PianoTrack::new("P");
        piano.insert_note(Note::new(60, 0.0, 1.0));

        let err = AutomationTrackDiff::new(&automation)
            .compute_changes(&SnapshotItem::capture(&piano))
            .unwrap_err();
        assert!(matches!(err, VcsError::MisalignedDeltas { index: 3, .. }));
    }

    #[test]
    fn entity_types_are_reported() {
        let track = AutomationTrack::new("A");
        assert_eq!(AutomationTrackDiff::new(&track).entity_type(), "automationTrack");
    }
}
