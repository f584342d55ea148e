//! Auth error type.

use thiserror::Error;

/// Reasons a request is not authorized. All of them surface as 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingToken,

    #[error("authorization header is not a bearer token")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("user '{0}' is not an admin")]
    NotAdmin(String),
}
