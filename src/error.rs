//! Error type shared by every fallible operation in the crate.
//!
//! All errors are raised synchronously at the offending call and leave the
//! structures involved exactly as they were before the call.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, CollectionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A parameter is outside the range the operation accepts.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// Decrement of a key the map does not hold.
    #[error("key not found")]
    NotFound,

    /// Decrement by more than the stored counter.
    #[error("cannot decrement by {requested}: counter is {available}")]
    Underflow { requested: usize, available: usize },

    /// Increment would push a counter past `usize::MAX`.
    #[error("counter overflow")]
    Overflow,

    /// Reduction over an empty sequence that has no neutral element.
    #[error("`{operation}` called on an empty sequence")]
    Empty { operation: &'static str },
}

impl CollectionError {
    pub(crate) const fn invalid(name: &'static str, reason: &'static str) -> Self {
        CollectionError::InvalidArgument { name, reason }
    }
}
