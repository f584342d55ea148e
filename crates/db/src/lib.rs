//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, and repository functions
//! for the `companies` and `jobs` tables. Dynamic SQL (partial updates,
//! filtered lists) is assembled from `query` fragments; everything else is a
//! fixed parameterized statement.

mod bind;
pub mod error;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use pool::{DbPool, PoolConfig};
