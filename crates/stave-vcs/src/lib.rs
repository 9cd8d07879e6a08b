//! Generic delta versioning core for the Stave document model.
//!
//! Every versionable entity in a Stave document exposes its mutable state as
//! a small ordered set of named deltas. This crate defines the contract those
//! entities implement and the machinery built on top of it: enumerating an
//! entity's deltas, serializing each delta body on demand, comparing two
//! entities into a minimal changeset, and checking an entity out to a foreign
//! state.
//!
//! # Key Types
//!
//! - [`Delta`] — One named, independently serializable unit of entity state
//! - [`TrackedItem`] — The capability every versionable entity implements
//! - [`SnapshotItem`] — A frozen capture of any tracked item (a revision)
//! - [`DiffLogic`] / [`Changeset`] — Per-entity-type comparison strategy and its output
//! - [`checkout::reset_from`] — The delta-by-delta checkout loop
//!
//! Unknown delta kinds and out-of-range indices are contract violations
//! between entity type definitions, not runtime conditions: they panic
//! loudly rather than producing corrupted state. Malformed payloads decode
//! to [`VcsError`] and are the entity's policy to handle.

pub mod checkout;
pub mod delta;
pub mod diff;
pub mod error;
pub mod kinds;
pub mod snapshot;
pub mod tracked;

pub use delta::Delta;
pub use diff::{diff_children_by_id, scalar_changed, Changeset, DiffLogic, MembershipDiff};
pub use error::{VcsError, VcsResult};
pub use snapshot::SnapshotItem;
pub use tracked::TrackedItem;
