//! `WHERE` clause generation for list queries.
//!
//! Each entity declares a [`FilterRules`] table; the allowed filter keys are
//! exactly the keys of that table.

use serde_json::{Map, Value};

use crate::{QueryError, SqlFragment, SqlValue, ValueKind};

/// The SQL condition a filter key turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match: `LOWER(col) LIKE $n`.
    Contains(&'static str),
    /// `col >= $n`
    AtLeast(&'static str),
    /// `col <= $n`
    AtMost(&'static str),
    /// A fixed condition that binds nothing, e.g. `equity > 0`.
    Flag(&'static str),
}

impl Predicate {
    fn render(&self, placeholder: usize) -> String {
        match self {
            Self::Contains(column) => format!("LOWER({column}) LIKE ${placeholder}"),
            Self::AtLeast(column) => format!("{column} >= ${placeholder}"),
            Self::AtMost(column) => format!("{column} <= ${placeholder}"),
            Self::Flag(sql) => (*sql).to_string(),
        }
    }

    fn binds(&self) -> bool {
        !matches!(self, Self::Flag(_))
    }

    fn transform(&self, value: SqlValue) -> SqlValue {
        match (self, value) {
            (Self::Contains(_), SqlValue::Text(text)) => {
                SqlValue::Text(format!("%{}%", text.to_lowercase()))
            }
            (_, value) => value,
        }
    }
}

/// Declares how one filter key is read and what it matches.
#[derive(Debug, Clone, Copy)]
pub struct PredicateRule {
    pub key: &'static str,
    pub kind: ValueKind,
    pub predicate: Predicate,
}

impl PredicateRule {
    pub const fn new(key: &'static str, kind: ValueKind, predicate: Predicate) -> Self {
        Self { key, kind, predicate }
    }
}

/// The closed set of filter keys an entity accepts.
#[derive(Debug, Clone, Copy)]
pub struct FilterRules {
    rules: &'static [PredicateRule],
}

impl FilterRules {
    pub const fn new(rules: &'static [PredicateRule]) -> Self {
        Self { rules }
    }

    pub fn allows(&self, key: &str) -> bool {
        self.rule(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.key)
    }

    fn rule(&self, key: &str) -> Option<&PredicateRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }
}

/// Build the `WHERE` clause of a list query from untrusted filter options.
///
/// All keys are checked before anything else happens. Falsy values
/// (`null`, `false`, `0`, `""`) mean "no filter" and are skipped, so a
/// filter such as `minEmployees=0` cannot be expressed. Predicates are joined
/// with ` AND `; with none left the clause is empty and the query lists
/// every row.
///
/// # Errors
/// - [`QueryError::InvalidKey`] for any key outside `rules`.
/// - [`QueryError::InvalidValue`] for a value that cannot be read as the
///   key's kind.
pub fn build_filter_clause(
    filter: &Map<String, Value>,
    rules: &FilterRules,
) -> Result<SqlFragment, QueryError> {
    let requested = filter
        .iter()
        .map(|(key, raw)| {
            rules
                .rule(key)
                .map(|rule| (rule, raw))
                .ok_or_else(|| QueryError::InvalidKey(key.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut present = Vec::with_capacity(requested.len());
    for (rule, raw) in requested {
        let value = rule.kind.from_param(rule.key, raw)?;
        if !value.is_falsy() {
            present.push((rule, value));
        }
    }

    let mut predicates = Vec::with_capacity(present.len());
    let mut values = Vec::new();
    for (rule, value) in present {
        if rule.predicate.binds() {
            values.push(rule.predicate.transform(value));
        }
        // Placeholders follow the value list, so a flag leaves no gap.
        predicates.push(rule.predicate.render(values.len()));
    }

    let clause = if predicates.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", predicates.join(" AND "))
    };

    Ok(SqlFragment { clause, values })
}
