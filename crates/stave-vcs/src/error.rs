use stave_state::StateError;
use thiserror::Error;

/// Errors that can occur while diffing or checking out tracked items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VcsError {
    /// A delta payload failed to decode (missing property, bad colour, ...).
    #[error("malformed delta payload: {0}")]
    State(#[from] StateError),

    /// Two items being compared declare different kinds at the same index.
    ///
    /// Diff and checkout are positional, so this is version skew between
    /// entity type definitions and never recoverable mid-operation.
    #[error("misaligned delta declarations at index {index}: {owner_kind} vs {other_kind}")]
    MisalignedDeltas {
        index: usize,
        owner_kind: String,
        other_kind: String,
    },
}

/// Convenience alias for versioning results.
pub type VcsResult<T> = Result<T, VcsError>;
