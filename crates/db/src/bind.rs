//! Binding `query` fragment values onto sqlx statements.

use query::{SqlValue, ValueKind};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// Bind `values` in order, so `$i` receives `values[i - 1]`.
pub(crate) fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(text) => query.bind(text),
            SqlValue::Int(int) => query.bind(int),
            SqlValue::Float(float) => query.bind(float),
            SqlValue::Bool(flag) => query.bind(flag),
            // NULL still needs a parameter type the column accepts.
            SqlValue::Null(ValueKind::Text) => query.bind(None::<String>),
            SqlValue::Null(ValueKind::Integer) => query.bind(None::<i64>),
            SqlValue::Null(ValueKind::Numeric) => query.bind(None::<f64>),
            SqlValue::Null(ValueKind::Boolean) => query.bind(None::<bool>),
        };
    }
    query
}
