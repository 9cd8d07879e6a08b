//! Minimal observable stand-in for the history/undo layer.
//!
//! The real undo stack lives above this crate. Track setters still need the
//! suppress-recording flag at this layer, so each track keeps a log of
//! applied scalar changes (the notification channel) and of the subset that
//! was recorded as undoable. A checkout always suppresses undo recording.

/// Scalar track fields that emit change notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackField {
    Path,
    Colour,
    Instrument,
    Controller,
}

/// Per-track record of applied scalar changes.
#[derive(Clone, Debug, Default)]
pub struct ChangeLog {
    changes: Vec<TrackField>,
    undo: Vec<TrackField>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note an applied change; record it as an undo step when `undoable`.
    pub fn record(&mut self, field: TrackField, undoable: bool) {
        self.changes.push(field);
        if undoable {
            self.undo.push(field);
        }
    }

    /// Every applied change, in order.
    pub fn changes(&self) -> &[TrackField] {
        &self.changes
    }

    /// Only the changes recorded as undoable user edits.
    pub fn undo_steps(&self) -> &[TrackField] {
        &self.undo
    }

    pub fn clear(&mut self) {
        self.changes.clear();
        self.undo.clear();
    }
}
