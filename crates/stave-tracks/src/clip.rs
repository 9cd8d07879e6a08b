//! Pattern clips: positioned instances of a track's sequence.

use stave_state::{StateError, StateNode, StateResult};
use uuid::Uuid;

use crate::sequence::SequencedItem;

/// A clip placing the track's sequence at a beat position.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    id: Uuid,
    beat: f64,
}

impl Clip {
    pub fn new(beat: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            beat,
        }
    }

    pub fn beat(&self) -> f64 {
        self.beat
    }
}

impl SequencedItem for Clip {
    const TAG: &'static str = "clip";

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
    }

    fn deserialize(data: &StateNode) -> StateResult<Self> {
        data.expect_tag(Self::TAG)?;
        let raw = data.string_property("id")?;
        Ok(Self {
            id: raw
                .parse()
                .map_err(|_| StateError::InvalidUuid(raw.to_string()))?,
            beat: data.float_property("beat")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_round_trips() {
        let clip = Clip::new(16.0);
        assert_eq!(Clip::deserialize(&clip.serialize()).unwrap(), clip);
    }
}
