//! `/jobs` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::{models::NewJob, repository::jobs as job_repo};
use serde_json::{json, Map, Value};
use tracing::info;

use super::filter_map;
use crate::{error::ApiError, extract::AdminUser, AppState};

pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new) = body?;
    let job = job_repo::create_job(&state.pool, &new).await?;
    info!(id = job.id, company = %job.company_handle, by = %admin.username, "job created");
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(pairs) = params?;
    let jobs = job_repo::list_jobs(&state.pool, &filter_map(pairs)).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let job = job_repo::get_job(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(data) = body?;
    let job = job_repo::update_job(&state.pool, id, &data).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    job_repo::remove_job(&state.pool, id).await?;
    info!(id, by = %admin.username, "job deleted");
    Ok(Json(json!({ "deleted": id.to_string() })))
}
