use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid ticket id {0:?}: expected 'T' followed by 6 digits")]
    InvalidTicketId(String),

    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("unknown ticket field: {0}")]
    UnknownField(String),
}
