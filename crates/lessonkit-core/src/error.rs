//! Game and catalog error types.
//!
//! Both are local and recoverable: a caller shows the message and lets the
//! user try again. Nothing in the resource library raises errors.

use thiserror::Error;

/// Misuse of a sequencing game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The operation does not apply to the session as it stands.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// `evaluate` was called before every stage was placed.
    #[error("incomplete submission: {placed} of {total} stages placed")]
    IncompleteSubmission { placed: usize, total: usize },
}

/// A stage list that cannot form a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no stages")]
    Empty,

    #[error("duplicate stage id: {0}")]
    DuplicateId(String),

    /// `correct_order` values must be exactly `1..=N`.
    #[error("correct_order values must run 1..N without gaps: expected {expected}, found {found}")]
    NonContiguousOrder { expected: u32, found: u32 },
}

impl GameError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GameError::InvalidState(message.into())
    }
}
