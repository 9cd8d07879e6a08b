use thiserror::Error;

/// Errors produced when decoding values out of a state tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("missing property: {name}")]
    MissingProperty { name: String },

    #[error("property {name} has the wrong type: expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },

    #[error("invalid colour string: {0:?}")]
    InvalidColour(String),

    #[error("invalid uuid string: {0:?}")]
    InvalidUuid(String),

    #[error("unexpected node tag: expected {expected}, got {actual}")]
    WrongTag { expected: String, actual: String },
}

/// Convenience alias for state decode results.
pub type StateResult<T> = Result<T, StateError>;
