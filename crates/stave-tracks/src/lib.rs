//! Versionable track entities for the Stave document model.
//!
//! Concrete implementations of the `stave-vcs` contract: an automation
//! track (path, colour, instrument, controller number, automation events,
//! clips) and a piano track (path, colour, instrument, notes, clips), each
//! with its own diff logic. Their sequences and patterns are plain domain
//! containers; only the owning track participates in delta tracking.
//!
//! # Key Types
//!
//! - [`AutomationTrack`] / [`PianoTrack`] — Tracked entities
//! - [`AutomationTrackDiff`] / [`PianoTrackDiff`] — Owner-bound diff logic
//! - [`Sequence`] / [`Pattern`] — Ordered item containers with a cached beat range
//! - [`AutomationEvent`] / [`Note`] / [`Clip`] — Sequenced domain items

pub mod automation;
pub mod clip;
pub mod diff;
pub mod events;
pub mod journal;
pub mod piano;
pub mod sequence;

pub use automation::AutomationTrack;
pub use clip::Clip;
pub use diff::{AutomationTrackDiff, PianoTrackDiff};
pub use events::{AutomationEvent, Note};
pub use journal::{ChangeLog, TrackField};
pub use piano::PianoTrack;
pub use sequence::{Pattern, Sequence, SequencedItem};
