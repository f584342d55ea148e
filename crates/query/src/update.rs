//! Partial-update `SET` clause generation.
//!
//! Callers resolve an untrusted JSON body against their entity's
//! [`UpdateRules`], then hand the typed pairs to [`build_set_clause`] together
//! with the entity's [`ColumnMap`]:
//!
//! ```
//! use query::{build_set_clause, ColumnMap, FieldRule, UpdateRules, ValueKind};
//!
//! const COLUMNS: ColumnMap = ColumnMap::new(&[("numEmployees", "num_employees")]);
//! const FIELDS: UpdateRules = UpdateRules::new(&[
//!     FieldRule::required("name", ValueKind::Text),
//!     FieldRule::nullable("numEmployees", ValueKind::Integer),
//! ]);
//!
//! let body = serde_json::json!({ "numEmployees": 12, "name": "Acme" });
//! let fields = FIELDS.resolve(body.as_object().unwrap()).unwrap();
//! let set = build_set_clause(fields, &COLUMNS).unwrap();
//! assert_eq!(set.clause, r#""num_employees"=$1, "name"=$2"#);
//! assert_eq!(set.next_placeholder(), 3);
//! ```

use serde_json::{Map, Value};

use crate::{QueryError, SqlFragment, SqlValue, ValueKind};

/// Fixed mapping from API field names to storage column names.
///
/// Keys that are not listed map to themselves. Column names are trusted as
/// identifiers, so a map must only ever be built from code-defined constants.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    pub const IDENTITY: ColumnMap = ColumnMap::new(&[]);

    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Storage column for `key`, or `key` itself when unmapped.
    pub fn column<'a>(&self, key: &'a str) -> &'a str {
        for (field, column) in self.entries {
            if *field == key {
                return *column;
            }
        }
        key
    }
}

/// Limits a non-null value must respect on top of its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Any,
    /// Text that is not blank.
    NonEmpty,
    /// Inclusive numeric range; `max` may be infinite.
    Range { min: f64, max: f64 },
}

impl Bound {
    fn requirement(self) -> String {
        match self {
            Self::Any => String::new(),
            Self::NonEmpty => "not be empty".into(),
            Self::Range { min, max } if max.is_infinite() && min == 0.0 => {
                "not be negative".into()
            }
            Self::Range { min, max } if max.is_infinite() => format!("be at least {min}"),
            Self::Range { min, max } => format!("be between {min} and {max}"),
        }
    }

    fn admits(self, value: &SqlValue) -> bool {
        match (self, value) {
            (Self::NonEmpty, SqlValue::Text(text)) => !text.trim().is_empty(),
            (Self::Range { min, max }, SqlValue::Int(int)) => (min..=max).contains(&(*int as f64)),
            (Self::Range { min, max }, SqlValue::Float(float)) => (min..=max).contains(float),
            _ => true,
        }
    }
}

/// One updatable field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub kind: ValueKind,
    /// Whether `null` may be written to the column.
    pub nullable: bool,
    pub bound: Bound,
}

impl FieldRule {
    pub const fn required(key: &'static str, kind: ValueKind) -> Self {
        Self { key, kind, nullable: false, bound: Bound::Any }
    }

    pub const fn nullable(key: &'static str, kind: ValueKind) -> Self {
        Self { key, kind, nullable: true, bound: Bound::Any }
    }

    pub const fn non_empty(self) -> Self {
        Self { bound: Bound::NonEmpty, ..self }
    }

    pub const fn at_least(self, min: f64) -> Self {
        Self { bound: Bound::Range { min, max: f64::INFINITY }, ..self }
    }

    pub const fn between(self, min: f64, max: f64) -> Self {
        Self { bound: Bound::Range { min, max }, ..self }
    }
}

/// The closed set of fields an entity accepts in a partial update.
#[derive(Debug, Clone, Copy)]
pub struct UpdateRules {
    fields: &'static [FieldRule],
}

impl UpdateRules {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    fn field(&self, key: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.key == key)
    }

    /// Check every key and value of `data` and return typed pairs in the
    /// body's key order.
    ///
    /// # Errors
    /// - [`QueryError::UnknownField`] for a key without a rule.
    /// - [`QueryError::InvalidValue`] for a value of the wrong kind.
    /// - [`QueryError::NullValue`] for `null` on a non-nullable field.
    /// - [`QueryError::OutOfBounds`] for a value outside the field's [`Bound`].
    pub fn resolve(
        &self,
        data: &Map<String, Value>,
    ) -> Result<Vec<(&'static str, SqlValue)>, QueryError> {
        data.iter()
            .map(|(key, raw)| {
                let rule = self
                    .field(key)
                    .ok_or_else(|| QueryError::UnknownField(key.clone()))?;
                let value = rule.kind.from_json(key, raw)?;
                if matches!(value, SqlValue::Null(_)) && !rule.nullable {
                    return Err(QueryError::NullValue(key.clone()));
                }
                if !rule.bound.admits(&value) {
                    return Err(QueryError::OutOfBounds {
                        key: key.clone(),
                        requirement: rule.bound.requirement(),
                    });
                }
                Ok((rule.key, value))
            })
            .collect()
    }
}

/// Build the `SET` list of an UPDATE statement.
///
/// Emits `"<column>"=$<n>` per entry, numbered from 1 in iteration order and
/// joined with `, `. The values come back unchanged, in the same order.
///
/// # Errors
/// [`QueryError::NoData`] if `data` yields nothing.
pub fn build_set_clause<K, I>(data: I, columns: &ColumnMap) -> Result<SqlFragment, QueryError>
where
    I: IntoIterator<Item = (K, SqlValue)>,
    K: AsRef<str>,
{
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    for (key, value) in data {
        values.push(value);
        let column = columns.column(key.as_ref());
        assignments.push(format!("{}=${}", quote_ident(column), values.len()));
    }

    if values.is_empty() {
        return Err(QueryError::NoData);
    }

    Ok(SqlFragment {
        clause: assignments.join(", "),
        values,
    })
}

fn quote_ident(column: &str) -> String {
    format!("\"{}\"", column.replace('"', "\"\""))
}
