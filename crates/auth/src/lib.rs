//! `auth` crate — bearer tokens for admin-only writes.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. The API crate turns an
//! `Authorization: Bearer …` header into verified claims via [`TokenKeys`].

pub mod claims;
pub mod error;
pub mod token;

pub use claims::Claims;
pub use error::AuthError;
pub use token::{bearer_token, TokenKeys};
