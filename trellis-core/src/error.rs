// Error types for route collection

use crate::entry::HandlerRef;
use thiserror::Error;

/// Fatal errors raised during a collection pass.
///
/// Both kinds abort the pass; a conflicting or invalid declaration set
/// yields no route table at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Two entries in the same group claim the same pattern with the same
    /// non-empty method.
    #[error("Duplicate route: {method} {pattern} declared by both {existing} and {rejected}")]
    DuplicateRoute {
        method: String,
        pattern: String,
        existing: HandlerRef,
        rejected: HandlerRef,
    },

    /// A resolved mount prefix contains a wildcard character.
    #[error("Invalid prefix: {prefix} contains a wildcard")]
    InvalidPrefix { prefix: String },
}

impl RouterError {
    /// Check if this is a duplicate-registration conflict
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RouterError::DuplicateRoute { .. })
    }

    /// Check if this is a rejected mount prefix
    pub fn is_invalid_prefix(&self) -> bool {
        matches!(self, RouterError::InvalidPrefix { .. })
    }
}
