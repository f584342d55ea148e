//! Typed error type for the db crate.

use thiserror::Error;

/// SQLSTATE for a value that does not fit its column type.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Query(#[from] query::QueryError),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// Translate integrity-constraint and range failures into caller errors.
    ///
    /// `on_conflict` names the row for unique violations and `on_missing` the
    /// referenced row for foreign-key violations.
    pub(crate) fn from_constraint(
        err: sqlx::Error,
        on_conflict: impl FnOnce() -> String,
        on_missing: impl FnOnce() -> String,
    ) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::BadRequest(on_conflict());
            }
            if db_err.is_foreign_key_violation() {
                return Self::BadRequest(on_missing());
            }
            if db_err.is_check_violation() {
                let constraint = db_err.constraint().unwrap_or("check");
                return Self::BadRequest(format!("constraint violated: {constraint}"));
            }
            if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
                return Self::BadRequest("value out of range".into());
            }
        }
        Self::Sqlx(err)
    }

    /// Whether this error is the caller's fault rather than the server's.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::Query(_))
    }
}
