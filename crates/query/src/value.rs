//! Bindable values and the kinds declared for each key.

use serde_json::Value;

use crate::QueryError;

/// The storage type a key's values must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// 32-bit, the range of a Postgres `INTEGER` column.
    Integer,
    Numeric,
    Boolean,
}

impl ValueKind {
    fn expected(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Numeric => "a number",
            Self::Boolean => "a boolean",
        }
    }

    fn invalid(self, key: &str) -> QueryError {
        QueryError::InvalidValue {
            key: key.to_string(),
            expected: self.expected(),
        }
    }

    /// Strict conversion of a JSON body value. Strings are never read as
    /// numbers or booleans.
    pub fn from_json(self, key: &str, value: &Value) -> Result<SqlValue, QueryError> {
        match (self, value) {
            (_, Value::Null) => Ok(SqlValue::Null(self)),
            (Self::Text, Value::String(s)) => Ok(SqlValue::Text(s.clone())),
            (Self::Integer, Value::Number(n)) => {
                n.as_i64()
                    .and_then(|int| i32::try_from(int).ok())
                    .map(SqlValue::from)
                    .ok_or_else(|| self.invalid(key))
            }
            (Self::Numeric, Value::Number(n)) => {
                n.as_f64().map(SqlValue::Float).ok_or_else(|| self.invalid(key))
            }
            (Self::Boolean, Value::Bool(b)) => Ok(SqlValue::Bool(*b)),
            _ => Err(self.invalid(key)),
        }
    }

    /// Lenient conversion for filter parameters, which usually arrive as
    /// query-string text. An empty string reads as "not provided".
    pub fn from_param(self, key: &str, value: &Value) -> Result<SqlValue, QueryError> {
        let Value::String(raw) = value else {
            return self.from_json(key, value);
        };
        let trimmed = raw.trim();
        match self {
            Self::Text => Ok(SqlValue::Text(raw.clone())),
            _ if trimmed.is_empty() => Ok(SqlValue::Null(self)),
            Self::Integer => trimmed
                .parse::<i32>()
                .map(SqlValue::from)
                .map_err(|_| self.invalid(key)),
            Self::Numeric => match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(SqlValue::Float(f)),
                _ => Err(self.invalid(key)),
            },
            Self::Boolean => match trimmed {
                "true" => Ok(SqlValue::Bool(true)),
                "false" => Ok(SqlValue::Bool(false)),
                _ => Err(self.invalid(key)),
            },
        }
    }
}

/// A value ready to be bound to a positional placeholder.
///
/// `Null` keeps its kind so the driver can send a typed NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null(ValueKind),
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// `null`, `false`, `0`, `0.0` and `""` all mean "not provided" to the
    /// filter builder.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null(_) => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_conversion_rejects_numeric_strings() {
        let err = ValueKind::Integer.from_json("salary", &json!("100")).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidValue { key: "salary".into(), expected: "an integer" }
        );
    }

    #[test]
    fn strict_conversion_rejects_numbers_for_text() {
        assert!(ValueKind::Text.from_json("title", &json!(1234)).is_err());
    }

    #[test]
    fn strict_conversion_rejects_fractional_integers() {
        assert!(ValueKind::Integer.from_json("salary", &json!(1.5)).is_err());
    }

    #[test]
    fn integers_must_fit_an_int4_column() {
        assert_eq!(
            ValueKind::Integer.from_json("salary", &json!(i32::MAX)).unwrap(),
            SqlValue::Int(i32::MAX.into())
        );
        assert!(ValueKind::Integer.from_json("salary", &json!(3_000_000_000_i64)).is_err());
        assert!(ValueKind::Integer.from_json("salary", &json!(-3_000_000_000_i64)).is_err());
        assert!(ValueKind::Integer.from_param("minSalary", &json!("3000000000")).is_err());
    }

    #[test]
    fn null_keeps_its_kind() {
        assert_eq!(
            ValueKind::Numeric.from_json("equity", &Value::Null).unwrap(),
            SqlValue::Null(ValueKind::Numeric)
        );
    }

    #[test]
    fn params_parse_query_string_text() {
        assert_eq!(ValueKind::Integer.from_param("minSalary", &json!("250")).unwrap(), SqlValue::Int(250));
        assert_eq!(ValueKind::Boolean.from_param("hasEquity", &json!("true")).unwrap(), SqlValue::Bool(true));
        assert_eq!(ValueKind::Numeric.from_param("x", &json!(" 0.5 ")).unwrap(), SqlValue::Float(0.5));
        assert_eq!(ValueKind::Text.from_param("name", &json!(" net ")).unwrap(), SqlValue::Text(" net ".into()));
    }

    #[test]
    fn params_accept_json_numbers_too() {
        assert_eq!(ValueKind::Integer.from_param("minEmployees", &json!(2)).unwrap(), SqlValue::Int(2));
    }

    #[test]
    fn params_reject_garbage() {
        assert!(ValueKind::Integer.from_param("minEmployees", &json!("lots")).is_err());
        assert!(ValueKind::Boolean.from_param("hasEquity", &json!("yes")).is_err());
        assert!(ValueKind::Numeric.from_param("x", &json!("NaN")).is_err());
    }

    #[test]
    fn empty_param_reads_as_absent() {
        let v = ValueKind::Integer.from_param("minEmployees", &json!("")).unwrap();
        assert!(v.is_falsy());
    }

    #[test]
    fn falsy_values() {
        assert!(SqlValue::Int(0).is_falsy());
        assert!(SqlValue::Float(0.0).is_falsy());
        assert!(SqlValue::Bool(false).is_falsy());
        assert!(SqlValue::from("").is_falsy());
        assert!(SqlValue::Null(ValueKind::Text).is_falsy());
        assert!(!SqlValue::Int(-1).is_falsy());
        assert!(!SqlValue::from("0").is_falsy());
    }
}
