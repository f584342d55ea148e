//! `/companies` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use db::{models::NewCompany, repository::companies as company_repo};
use serde_json::{json, Map, Value};
use tracing::info;

use super::filter_map;
use crate::{error::ApiError, extract::AdminUser, AppState};

pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new) = body?;
    let company = company_repo::create_company(&state.pool, &new).await?;
    info!(handle = %company.handle, by = %admin.username, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(pairs) = params?;
    let companies = company_repo::list_companies(&state.pool, &filter_map(pairs)).await?;
    Ok(Json(json!({ "companies": companies })))
}

pub async fn get(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(handle) = handle?;
    let company = company_repo::get_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    handle: Result<Path<String>, PathRejection>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(handle) = handle?;
    let Json(data) = body?;
    let company = company_repo::update_company(&state.pool, &handle, &data).await?;
    Ok(Json(json!({ "company": company })))
}

pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(handle) = handle?;
    company_repo::remove_company(&state.pool, &handle).await?;
    info!(%handle, by = %admin.username, "company deleted");
    Ok(Json(json!({ "deleted": handle })))
}
