//! Event items: automation curve points and piano-roll notes.

use stave_state::{StateError, StateNode, StateResult};
use uuid::Uuid;

use crate::sequence::SequencedItem;

fn parse_id(data: &StateNode) -> StateResult<Uuid> {
    let raw = data.string_property("id")?;
    raw.parse()
        .map_err(|_| StateError::InvalidUuid(raw.to_string()))
}

/// One point on an automation curve.
#[derive(Clone, Debug, PartialEq)]
pub struct AutomationEvent {
    id: Uuid,
    beat: f64,
    value: f64,
    curvature: f64,
}

impl AutomationEvent {
    pub fn new(beat: f64, value: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            beat,
            value,
            curvature: 0.5,
        }
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    pub fn beat(&self) -> f64 {
        self.beat
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }
}

impl SequencedItem for AutomationEvent {
    const TAG: &'static str = "automationEvent";

    fn id(&self) -> Uuid {
        self.id
    }

    fn beat_span(&self) -> (f64, f64) {
        (self.beat, self.beat)
    }

    fn serialize(&self) -> StateNode {
        StateNode::new(Self::TAG)
            .with_property("id", self.id.to_string())
            .with_property("beat", self.beat)
            .with_property("value", self.value)
            .with_property("curve", self.curvature)
    }

    fn deserialize(data: &StateNode) -> StateResult<Self> {
        data.expect_tag(Self::TAG)?;
        Ok(Self {
            id: parse_id(data)?,
            beat: data.float_property("beat")?,
            value: data.float_property("value")?,
            curvature: data.float_property("curve")?,
        })
    }
}

/// One piano-roll note.
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    id: Uuid,
    key: i64,
    beat: f64,
    length: f64,
    velocity: f64,
}

impl Note {
    pub fn new(key: i64, beat: f64, length: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            key,
            beat,
            length,
            velocity: 0.8,
        }
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn beat(&self) -> f64 {
        self.beat
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

impl SequencedItem for Note {
    const TAG: &'static str = "note";

    fn id(&self) -> Uuid {
        self.id
    }

    fn beat_span(&self) -> (f64, f64) {
        (self.beat, self.beat + self.length)
    }

    fn serialize(&self) -> StateNode {
        StateNode::new(Self::TAG)
            .with_property("id", self.id.to_string())
            .with_property("key", self.key)
            .with_property("beat", self.beat)
            .with_property("length", self.length)
            .with_property("velocity", self.velocity)
    }

    fn deserialize(data: &StateNode) -> StateResult<Self> {
        data.expect_tag(Self::TAG)?;
        Ok(Self {
            id: parse_id(data)?,
            key: data.int_property("key")?,
            beat: data.float_property("beat")?,
            length: data.float_property("length")?,
            velocity: data.float_property("velocity")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automation_event_round_trips() {
        let event = AutomationEvent::new(2.5, 0.75).with_curvature(0.2);
        let restored = AutomationEvent::deserialize(&event.serialize()).unwrap();
        assert_eq!(event, restored);
    }

    #[test]
    fn note_round_trips_and_spans_its_length() {
        let note = Note::new(60, 4.0, 1.5).with_velocity(0.5);
        let restored = Note::deserialize(&note.serialize()).unwrap();
        assert_eq!(note, restored);
        assert_eq!(note.beat_span(), (4.0, 5.5));
    }

    #[test]
    fn deserialize_rejects_wrong_tag() {
        let node = Note::new(60, 0.0, 1.0).serialize();
        assert!(matches!(
            AutomationEvent::deserialize(&node),
            Err(StateError::WrongTag { .. })
        ));
    }

    #[test]
    fn deserialize_rejects_garbage_id() {
        let node = AutomationEvent::new(0.0, 0.0)
            .serialize()
            .with_property("id", "not-a-uuid");
        assert!(matches!(
            AutomationEvent::deserialize(&node),
            Err(StateError::InvalidUuid(_))
        ));
    }

    #[test]
    fn missing_property_is_reported() {
        let node = StateNode::new(AutomationEvent::TAG)
            .with_property("id", Uuid::now_v7().to_string())
            .with_property("beat", 1.0);
        assert!(matches!(
            AutomationEvent::deserialize(&node),
            Err(StateError::MissingProperty { .. })
        ));
    }
}
