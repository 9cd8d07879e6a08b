//! Delta kind identifiers shared across entity types.
//!
//! Kinds are stable dispatch tags, never display strings. Entities declare
//! the subset of kinds they version, always in the same order for a given
//! entity type; diff and checkout rely on that order being identical on both
//! sides.
//!
//! The `*_REMOVED` kinds appear only inside changesets, as the removal half
//! of a structural membership diff. No entity declares them as placeholders.

/// Track display path.
pub const TRACK_PATH: &str = "path";

/// Track colour, encoded as a `#AARRGGBB` string.
pub const TRACK_COLOUR: &str = "colour";

/// Identifier of the instrument the track is routed to.
pub const TRACK_INSTRUMENT: &str = "instrument";

/// MIDI controller number an automation track drives.
pub const TRACK_CONTROLLER: &str = "controller";

/// Full membership of a track's event sequence.
pub const EVENTS_ADDED: &str = "events-added";

/// Changeset-only: events to remove from the owner's sequence.
pub const EVENTS_REMOVED: &str = "events-removed";

/// Full membership of a track's clip pattern.
pub const CLIPS_ADDED: &str = "clips-added";

/// Changeset-only: clips to remove from the owner's pattern.
pub const CLIPS_REMOVED: &str = "clips-removed";

/// Property name scalar delta payloads store their value under.
pub const DELTA_PROP: &str = "delta";
