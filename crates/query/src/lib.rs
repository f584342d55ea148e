//! `query` crate — SQL fragment builders for the data-access layer.
//!
//! Two pure functions live here:
//! - [`build_set_clause`] — the `SET` list of a partial UPDATE.
//! - [`build_filter_clause`] — the `WHERE` clause of a filtered SELECT.
//!
//! Both return a [`SqlFragment`]: clause text using `$1..$n` placeholders plus
//! the values to bind, where `$i` refers to `values[i - 1]`. Entity-specific
//! behaviour comes entirely from static rule tables supplied by the caller.

pub mod error;
pub mod filter;
pub mod update;
pub mod value;

pub use error::QueryError;
pub use filter::{build_filter_clause, FilterRules, Predicate, PredicateRule};
pub use update::{build_set_clause, Bound, ColumnMap, FieldRule, UpdateRules};
pub use value::{SqlValue, ValueKind};

/// A clause and its ordered bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    /// Index of the next free placeholder, for appending a key condition
    /// after the fragment (`WHERE id = $n`).
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}
