//! The automation track: a curve of controller events under delta tracking.
//!
//! Declared delta kinds, in order: path, colour, instrument, controller,
//! events-added, clips-added. The order is part of the entity type's
//! versioning contract — diff and checkout align positionally.

use stave_state::{Colour, StateError, StateNode};
use stave_vcs::{checkout, kinds, Changeset, Delta, TrackedItem, VcsResult};
use uuid::Uuid;

use crate::clip::Clip;
use crate::events::AutomationEvent;
use crate::journal::{ChangeLog, TrackField};
use crate::sequence::{counted, Pattern, Sequence, SequencedItem};

/// Node tag of a full automation track snapshot.
pub const TRACK_TAG: &str = "automationTrack";
/// Node tag of the nested event sequence in a full snapshot.
pub const SEQUENCE_TAG: &str = "automation";
/// Node tag of the nested clip pattern in a full snapshot.
pub const PATTERN_TAG: &str = "pattern";

const DELTA_KINDS: &[&str] = &[
    kinds::TRACK_PATH,
    kinds::TRACK_COLOUR,
    kinds::TRACK_INSTRUMENT,
    kinds::TRACK_CONTROLLER,
    kinds::EVENTS_ADDED,
    kinds::CLIPS_ADDED,
];

/// A versionable automation track.
#[derive(Clone, Debug)]
pub struct AutomationTrack {
    uuid: Uuid,
    path: String,
    colour: Colour,
    instrument_id: String,
    controller_number: i64,
    sequence: Sequence<AutomationEvent>,
    pattern: Pattern,
    deltas: Vec<Delta>,
    journal: ChangeLog,
}

impl AutomationTrack {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::now_v7(),
            path: path.into(),
            colour: Colour::from_rgb(0xFF, 0xFF, 0xFF),
            instrument_id: String::new(),
            controller_number: 0,
            sequence: Sequence::new(),
            pattern: Pattern::new(),
            deltas: DELTA_KINDS.iter().map(|kind| Delta::new(*kind)).collect(),
            journal: ChangeLog::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn instrument_id(&self) -> &str {
        &self.instrument_id
    }

    pub fn controller_number(&self) -> i64 {
        self.controller_number
    }

    pub fn events(&self) -> &Sequence<AutomationEvent> {
        &self.sequence
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.journal
    }

    pub fn clear_change_log(&mut self) {
        self.journal.clear();
    }

    pub fn set_path(&mut self, path: impl Into<String>, undoable: bool) {
        self.path = path.into();
        self.journal.record(TrackField::Path, undoable);
    }

    pub fn set_colour(&mut self, colour: Colour, undoable: bool) {
        self.colour = colour;
        self.journal.record(TrackField::Colour, undoable);
    }

    pub fn set_instrument_id(&mut self, id: impl Into<String>, undoable: bool) {
        self.instrument_id = id.into();
        self.journal.record(TrackField::Instrument, undoable);
    }

    pub fn set_controller_number(&mut self, number: i64, undoable: bool) {
        self.controller_number = number;
        self.journal.record(TrackField::Controller, undoable);
    }

    /// Append an event and refresh the sequence's beat range.
    pub fn insert_event(&mut self, event: AutomationEvent) {
        self.sequence.insert(event);
        self.sequence.update_beat_range();
    }

    /// Append a clip and refresh the pattern's beat range.
    pub fn insert_clip(&mut self, clip: Clip) {
        self.pattern.insert(clip);
        self.pattern.update_beat_range();
    }

    // ------------------------------------------------------------------
    // Delta serialization
    // ------------------------------------------------------------------

    fn serialize_path_delta(&self) -> StateNode {
        StateNode::new(kinds::TRACK_PATH).with_property(kinds::DELTA_PROP, self.path.clone())
    }

    fn serialize_colour_delta(&self) -> StateNode {
        StateNode::new(kinds::TRACK_COLOUR)
            .with_property(kinds::DELTA_PROP, self.colour.to_string())
    }

    fn serialize_instrument_delta(&self) -> StateNode {
        StateNode::new(kinds::TRACK_INSTRUMENT)
            .with_property(kinds::DELTA_PROP, self.instrument_id.clone())
    }

    fn serialize_controller_delta(&self) -> StateNode {
        StateNode::new(kinds::TRACK_CONTROLLER)
            .with_property(kinds::DELTA_PROP, self.controller_number)
    }

    // ------------------------------------------------------------------
    // Delta reset handlers
    // ------------------------------------------------------------------

    fn apply_delta(&mut self, kind: &str, data: &StateNode) -> VcsResult<()> {
        match kind {
            kinds::TRACK_PATH => self.reset_path_delta(data),
            kinds::TRACK_COLOUR => self.reset_colour_delta(data),
            kinds::TRACK_INSTRUMENT => self.reset_instrument_delta(data),
            kinds::TRACK_CONTROLLER => self.reset_controller_delta(data),
            kinds::EVENTS_ADDED => self.reset_events_delta(data),
            kinds::CLIPS_ADDED => self.reset_clips_delta(data),
            unknown => panic!("automation track has no reset arm for delta kind {unknown:?}"),
        }
    }

    fn reset_path_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::TRACK_PATH)?;
        let path = data.string_property(kinds::DELTA_PROP)?.to_string();
        // Always reapplied, even when equal.
        self.set_path(path, false);
        Ok(())
    }

    fn reset_colour_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::TRACK_COLOUR)?;
        let colour: Colour = data.string_property(kinds::DELTA_PROP)?.parse()?;
        if colour != self.colour {
            self.set_colour(colour, false);
        }
        Ok(())
    }

    fn reset_instrument_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::TRACK_INSTRUMENT)?;
        let id = data.string_property(kinds::DELTA_PROP)?.to_string();
        self.set_instrument_id(id, false);
        Ok(())
    }

    fn reset_controller_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::TRACK_CONTROLLER)?;
        let number = data.int_property(kinds::DELTA_PROP)?;
        self.set_controller_number(number, false);
        Ok(())
    }

    fn reset_events_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::EVENTS_ADDED)?;
        self.sequence.deserialize(data)?;
        Ok(())
    }

    fn reset_clips_delta(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(kinds::CLIPS_ADDED)?;
        self.pattern.deserialize(data)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Changeset application
    // ------------------------------------------------------------------

    /// Apply a changeset produced by diffing this track against a target.
    ///
    /// Scalar records reuse the reset handlers. Structural records coming
    /// out of a diff carry membership changes, not the full collection:
    /// `events-added`/`clips-added` insert their children,
    /// `events-removed`/`clips-removed` remove by id.
    pub fn apply_changes(&mut self, changeset: &Changeset) -> VcsResult<()> {
        for record in changeset.iter() {
            match record.kind() {
                kinds::EVENTS_ADDED => {
                    for child in record.data().children_with_tag(AutomationEvent::TAG) {
                        self.sequence.insert(AutomationEvent::deserialize(child)?);
                    }
                }
                kinds::EVENTS_REMOVED => {
                    for child in record.data().children_with_tag(AutomationEvent::TAG) {
                        let event = AutomationEvent::deserialize(child)?;
                        self.sequence.remove_by_id(event.id());
                    }
                }
                kinds::CLIPS_ADDED => {
                    for child in record.data().children_with_tag(Clip::TAG) {
                        self.pattern.insert(Clip::deserialize(child)?);
                    }
                }
                kinds::CLIPS_REMOVED => {
                    for child in record.data().children_with_tag(Clip::TAG) {
                        let clip = Clip::deserialize(child)?;
                        self.pattern.remove_by_id(clip.id());
                    }
                }
                scalar => self.apply_delta(scalar, record.data())?,
            }
        }
        self.sequence.update_beat_range();
        self.pattern.update_beat_range();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Full-tree serialization (the bulk load path)
    // ------------------------------------------------------------------

    /// Serialize the whole track, nested sequence and pattern included.
    pub fn serialize(&self) -> StateNode {
        let mut tree = StateNode::new(TRACK_TAG);
        tree.set_property("uuid", self.uuid.to_string());
        tree.set_property("path", self.path.clone());
        tree.set_property("colour", self.colour.to_string());
        tree.set_property("instrument", self.instrument_id.clone());
        tree.set_property("controller", self.controller_number);
        tree.append_child(self.sequence.serialize(SEQUENCE_TAG));
        tree.append_child(self.pattern.serialize(PATTERN_TAG));
        tree
    }

    /// Repopulate the whole track from a full snapshot.
    ///
    /// This is the document-load path: state is written directly, without
    /// change notifications, and must converge to the same observable state
    /// as a delta-by-delta checkout of the same snapshot.
    pub fn deserialize(&mut self, data: &StateNode) -> VcsResult<()> {
        data.expect_tag(TRACK_TAG)?;
        let raw_uuid = data.string_property("uuid")?;
        self.uuid = raw_uuid
            .parse()
            .map_err(|_| StateError::InvalidUuid(raw_uuid.to_string()))?;
        self.path = data.string_property("path")?.to_string();
        self.colour = data.string_property("colour")?.parse()?;
        self.instrument_id = data.string_property("instrument")?.to_string();
        self.controller_number = data.int_property("controller")?;

        self.sequence.clear();
        if let Some(node) = data.first_child_with_tag(SEQUENCE_TAG) {
            self.sequence.deserialize(node)?;
        }
        self.pattern.clear();
        if let Some(node) = data.first_child_with_tag(PATTERN_TAG) {
            self.pattern.deserialize(node)?;
        }
        self.sequence.update_beat_range();
        self.pattern.update_beat_range();
        Ok(())
    }
}

impl TrackedItem for AutomationTrack {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn vcs_name(&self) -> &str {
        &self.path
    }

    fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    fn delta(&self, index: usize) -> Delta {
        let mut delta = self.deltas[index].clone();
        if delta.has_kind(kinds::EVENTS_ADDED) {
            delta.set_description(if self.sequence.is_empty() {
                "empty sequence".to_string()
            } else {
                counted(self.sequence.len(), "event")
            });
        } else if delta.has_kind(kinds::CLIPS_ADDED) {
            delta.set_description(if self.pattern.is_empty() {
                "empty pattern".to_string()
            } else {
                counted(self.pattern.len(), "clip")
            });
        }
        delta
    }

    fn delta_data(&self, index: usize) -> StateNode {
        match self.deltas[index].kind() {
            kinds::TRACK_PATH => self.serialize_path_delta(),
            kinds::TRACK_COLOUR => self.serialize_colour_delta(),
            kinds::TRACK_INSTRUMENT => self.serialize_instrument_delta(),
            kinds::TRACK_CONTROLLER => self.serialize_controller_delta(),
            kinds::EVENTS_ADDED => self.sequence.serialize(kinds::EVENTS_ADDED),
            kinds::CLIPS_ADDED => self.pattern.serialize(kinds::CLIPS_ADDED),
            unknown => panic!("automation track has no serialize arm for delta kind {unknown:?}"),
        }
    }

    fn reset_state_to(&mut self, other: &dyn TrackedItem) -> VcsResult<()> {
        checkout::reset_from(other, |kind, data| self.apply_delta(kind, data))?;
        // Derived bounds recomputed once, after all structural handlers.
        self.sequence.update_beat_range();
        self.pattern.update_beat_range();
        Ok(())
    }
}
