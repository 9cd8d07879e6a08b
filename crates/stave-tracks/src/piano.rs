//! The piano track: a note sequence under delta tracking.
//!
//! Same versioning shape as the automation track minus the controller
//! delta. Declared kinds, in order: path, colour, instrument, events-added,
//! clips-added.

use stave_state::{Colour, StateNode};
use stave_vcs::{checkout, kinds, Delta, TrackedItem, VcsResult};
use uuid::Uuid;

use crate::clip::Clip;
use crate::events::Note;
use crate::journal::{ChangeLog, TrackField};
use crate::sequence::{counted, Pattern, Sequence};

const DELTA_KINDS: &[&str] = &[
    kinds::TRACK_PATH,
    kinds::TRACK_COLOUR,
    kinds::TRACK_INSTRUMENT,
    kinds::EVENTS_ADDED,
    kinds::CLIPS_ADDED,
];

/// A versionable piano-roll track.
#[derive(Clone, Debug)]
pub struct PianoTrack {
    uuid: Uuid,
    path: String,
    colour: Colour,
    instrument_id: String,
    notes: Sequence<Note>,
    pattern: Pattern,
    deltas: Vec<Delta>,
    journal: ChangeLog,
}

impl PianoTrack {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::now_v7(),
            path: path.into(),
            colour: Colour::from_rgb(0xFF, 0xFF, 0xFF),
            instrument_id: String::new(),
            notes: Sequence::new(),
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

    pub fn notes(&self) -> &Sequence<Note> {
        &self.notes
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.journal
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

    pub fn insert_note(&mut self, note: Note) {
        self.notes.insert(note);
        self.notes.update_beat_range();
    }

    pub fn insert_clip(&mut self, clip: Clip) {
        self.pattern.insert(clip);
        self.pattern.update_beat_range();
    }

    fn apply_delta(&mut self, kind: &str, data: &StateNode) -> VcsResult<()> {
        match kind {
            kinds::TRACK_PATH => {
                data.expect_tag(kinds::TRACK_PATH)?;
                let path = data.string_property(kinds::DELTA_PROP)?.to_string();
                self.set_path(path, false);
            }
            kinds::TRACK_COLOUR => {
                data.expect_tag(kinds::TRACK_COLOUR)?;
                let colour: Colour = data.string_property(kinds::DELTA_PROP)?.parse()?;
                if colour != self.colour {
                    self.set_colour(colour, false);
                }
            }
            kinds::TRACK_INSTRUMENT => {
                data.expect_tag(kinds::TRACK_INSTRUMENT)?;
                let id = data.string_property(kinds::DELTA_PROP)?.to_string();
                self.set_instrument_id(id, false);
            }
            kinds::EVENTS_ADDED => {
                data.expect_tag(kinds::EVENTS_ADDED)?;
                self.notes.deserialize(data)?;
            }
            kinds::CLIPS_ADDED => {
                data.expect_tag(kinds::CLIPS_ADDED)?;
                self.pattern.deserialize(data)?;
            }
            unknown => panic!("piano track has no reset arm for delta kind {unknown:?}"),
        }
        Ok(())
    }
}

impl TrackedItem for PianoTrack {
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
            delta.set_description(if self.notes.is_empty() {
                "empty sequence".to_string()
            } else {
                counted(self.notes.len(), "note")
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
            kinds::TRACK_PATH => {
                StateNode::new(kinds::TRACK_PATH).with_property(kinds::DELTA_PROP, self.path.clone())
            }
            kinds::TRACK_COLOUR => StateNode::new(kinds::TRACK_COLOUR)
                .with_property(kinds::DELTA_PROP, self.colour.to_string()),
            kinds::TRACK_INSTRUMENT => StateNode::new(kinds::TRACK_INSTRUMENT)
                .with_property(kinds::DELTA_PROP, self.instrument_id.clone()),
            kinds::EVENTS_ADDED => self.notes.serialize(kinds::EVENTS_ADDED),
            kinds::CLIPS_ADDED => self.pattern.serialize(kinds::CLIPS_ADDED),
            unknown => panic!("piano track has no serialize arm for delta kind {unknown:?}"),
        }
    }

    fn reset_state_to(&mut self, other: &dyn TrackedItem) -> VcsResult<()> {
        checkout::reset_from(other, |kind, data| self.apply_delta(kind, data))?;
        self.notes.update_beat_range();
        self.pattern.update_beat_range();
        Ok(())
    }
}
