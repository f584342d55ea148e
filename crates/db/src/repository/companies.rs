//! Company CRUD operations.

use query::{
    build_filter_clause, build_set_clause, ColumnMap, FieldRule, FilterRules, Predicate,
    PredicateRule, UpdateRules, ValueKind,
};
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    bind::bind_values,
    models::{CompanyDetail, CompanyRow, NewCompany},
    repository::jobs,
    DbError,
};

/// API field names whose column is spelled differently.
pub const COLUMNS: ColumnMap = ColumnMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// Fields a PATCH may change. The handle is the key and stays fixed.
pub const UPDATABLE: UpdateRules = UpdateRules::new(&[
    FieldRule::required("name", ValueKind::Text).non_empty(),
    FieldRule::required("description", ValueKind::Text),
    FieldRule::nullable("numEmployees", ValueKind::Integer).at_least(0.0),
    FieldRule::nullable("logoUrl", ValueKind::Text),
]);

/// Query-string filters accepted by [`list_companies`].
pub const FILTERS: FilterRules = FilterRules::new(&[
    PredicateRule::new("name", ValueKind::Text, Predicate::Contains("name")),
    PredicateRule::new("minEmployees", ValueKind::Integer, Predicate::AtLeast("num_employees")),
    PredicateRule::new("maxEmployees", ValueKind::Integer, Predicate::AtMost("num_employees")),
]);

fn not_found(handle: &str) -> DbError {
    DbError::NotFound(format!("No company: {handle}"))
}

/// Insert a new company.
///
/// Returns `DbError::BadRequest` if the handle or name is already taken.
pub async fn create_company(pool: &PgPool, new: &NewCompany) -> Result<CompanyRow, DbError> {
    new.validate()?;

    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING handle, name, description, num_employees, logo_url
        "#,
    )
    .bind(&new.handle)
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.num_employees)
    .bind(&new.logo_url)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        DbError::from_constraint(
            err,
            || format!("Duplicate company: {}", new.handle),
            || format!("Invalid company: {}", new.handle),
        )
    })?;

    Ok(row)
}

/// Return companies matching `filter`, ordered by name.
///
/// `filter` is the raw query-string mapping; see [`FILTERS`].
pub async fn list_companies(
    pool: &PgPool,
    filter: &Map<String, Value>,
) -> Result<Vec<CompanyRow>, DbError> {
    let filter = build_filter_clause(filter, &FILTERS)?;
    let sql = format!(
        "SELECT handle, name, description, num_employees, logo_url \
         FROM companies {} ORDER BY name",
        filter.clause
    );
    debug!(%sql, params = filter.values.len(), "listing companies");

    let rows = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), filter.values)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetch a single company with its jobs.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DbError> {
    let company = sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT handle, name, description, num_employees, logo_url
        FROM companies
        WHERE handle = $1
        "#,
    )
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(handle))?;

    let jobs = jobs::jobs_for_company(pool, handle).await?;

    Ok(CompanyDetail { company, jobs })
}

/// Partially update a company; only the fields present in `data` change.
///
/// Returns `DbError::BadRequest` for an empty or invalid `data` and
/// `DbError::NotFound` if no company has this handle.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    data: &Map<String, Value>,
) -> Result<CompanyRow, DbError> {
    let fields = UPDATABLE.resolve(data)?;
    let set = build_set_clause(fields, &COLUMNS)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} \
         RETURNING handle, name, description, num_employees, logo_url",
        set.clause,
        set.next_placeholder()
    );
    debug!(%sql, "updating company");

    let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), set.values)
        .bind(handle)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            DbError::from_constraint(
                err,
                || "Duplicate company name".to_string(),
                || format!("Invalid company: {handle}"),
            )
        })?
        .ok_or_else(|| not_found(handle))?;

    Ok(row)
}

/// Delete a company and, through the foreign key, its jobs.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_company(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(handle));
    }

    Ok(())
}
