use axum::Json;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

pub mod companies;
pub mod jobs;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}

/// Turn query-string pairs into the mapping the filter builders take.
/// Pair order is kept; a repeated key keeps its last value.
pub(crate) fn filter_map(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
