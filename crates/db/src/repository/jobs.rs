//! Job CRUD operations.

use query::{
    build_filter_clause, build_set_clause, ColumnMap, FieldRule, FilterRules, Predicate,
    PredicateRule, UpdateRules, ValueKind,
};
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    bind::bind_values,
    models::{JobRow, NewJob},
    DbError,
};

/// Job field names already match their columns.
pub const COLUMNS: ColumnMap = ColumnMap::IDENTITY;

/// Fields a PATCH may change. `id` and `company_handle` are fixed; the
/// bounds match [`NewJob::validate`].
pub const UPDATABLE: UpdateRules = UpdateRules::new(&[
    FieldRule::required("title", ValueKind::Text).non_empty(),
    FieldRule::nullable("salary", ValueKind::Integer).at_least(0.0),
    FieldRule::nullable("equity", ValueKind::Numeric).between(0.0, 1.0),
]);

/// Query-string filters accepted by [`list_jobs`].
pub const FILTERS: FilterRules = FilterRules::new(&[
    PredicateRule::new("title", ValueKind::Text, Predicate::Contains("title")),
    PredicateRule::new("minSalary", ValueKind::Integer, Predicate::AtLeast("salary")),
    PredicateRule::new("hasEquity", ValueKind::Boolean, Predicate::Flag("equity > 0")),
]);

fn not_found(id: i32) -> DbError {
    DbError::NotFound(format!("No job: {id}"))
}

/// Insert a new job.
///
/// The parent company is checked by the foreign key in the same statement;
/// a missing company comes back as `DbError::BadRequest`.
pub async fn create_job(pool: &PgPool, new: &NewJob) -> Result<JobRow, DbError> {
    new.validate()?;

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, salary, equity, company_handle
        "#,
    )
    .bind(&new.title)
    .bind(new.salary)
    .bind(new.equity)
    .bind(&new.company_handle)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        DbError::from_constraint(
            err,
            || format!("Duplicate job: {}", new.title),
            || format!("Company doesn't exist: {}", new.company_handle),
        )
    })?;

    Ok(row)
}

/// Return jobs matching `filter`, ordered by title.
pub async fn list_jobs(pool: &PgPool, filter: &Map<String, Value>) -> Result<Vec<JobRow>, DbError> {
    let filter = build_filter_clause(filter, &FILTERS)?;
    let sql = format!(
        "SELECT id, title, salary, equity, company_handle \
         FROM jobs {} ORDER BY title",
        filter.clause
    );
    debug!(%sql, params = filter.values.len(), "listing jobs");

    let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), filter.values)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// All jobs posted by one company, oldest first.
pub async fn jobs_for_company(pool: &PgPool, handle: &str) -> Result<Vec<JobRow>, DbError> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, title, salary, equity, company_handle
        FROM jobs
        WHERE company_handle = $1
        ORDER BY id
        "#,
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch a single job by its primary key.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, title, salary, equity, company_handle
        FROM jobs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Partially update a job; only the fields present in `data` change.
pub async fn update_job(
    pool: &PgPool,
    id: i32,
    data: &Map<String, Value>,
) -> Result<JobRow, DbError> {
    let fields = UPDATABLE.resolve(data)?;
    let set = build_set_clause(fields, &COLUMNS)?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} \
         RETURNING id, title, salary, equity, company_handle",
        set.clause,
        set.next_placeholder()
    );
    debug!(%sql, "updating job");

    let row = bind_values(sqlx::query_as::<_, JobRow>(&sql), set.values)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            DbError::from_constraint(
                err,
                || format!("Duplicate job: {id}"),
                || format!("Invalid job: {id}"),
            )
        })?
        .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Permanently delete a job.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_job(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    Ok(())
}
