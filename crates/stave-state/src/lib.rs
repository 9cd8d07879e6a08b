//! Serialized state primitive for Stave.
//!
//! Every versioned payload in the Stave document model — full entity
//! snapshots and individual delta bodies alike — is a [`StateNode`]: a
//! tagged tree value with insertion-ordered named properties and an ordered
//! child list. The structure is transport-neutral; persistence containers
//! and sync layers decide how to encode it.
//!
//! # Key Types
//!
//! - [`StateNode`] — Tagged tree value (ordered properties + ordered children)
//! - [`Colour`] — ARGB colour round-tripped through its `#AARRGGBB` encoding
//! - [`StateError`] — Decode failures (missing/mistyped properties, bad colours)

pub mod colour;
pub mod error;
pub mod node;

pub use colour::Colour;
pub use error::{StateError, StateResult};
pub use node::StateNode;
