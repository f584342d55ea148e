//! Repository functions — one function per database operation.
//!
//! Every function takes a `&PgPool` and returns a `Result<T, DbError>`.
//! Each module also declares the static column, update and filter tables the
//! `query` builders run against.

pub mod companies;
pub mod jobs;
