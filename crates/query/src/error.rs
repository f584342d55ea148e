//! Builder-level error types.

use thiserror::Error;

/// Errors produced while turning caller input into SQL fragments.
///
/// Every variant is a caller mistake; the HTTP layer reports them as 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A partial update was requested with an empty payload.
    #[error("no data")]
    NoData,

    /// A filter key outside the entity's closed key set.
    #[error("invalid query variable: {0}")]
    InvalidKey(String),

    /// An update field the entity does not allow to change.
    #[error("invalid field: {0}")]
    UnknownField(String),

    /// A value that does not fit the kind declared for its key.
    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        expected: &'static str,
    },

    /// A well-typed value outside the bounds declared for its field.
    #[error("{key} must {requirement}")]
    OutOfBounds { key: String, requirement: String },

    /// `null` sent for a field that cannot be cleared.
    #[error("'{0}' cannot be null")]
    NullValue(String),
}
