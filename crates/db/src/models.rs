//! Row structs that map 1-to-1 onto database tables, plus creation payloads.
//!
//! Rows serialize with the field names the HTTP API exposes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::DbError;

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A persisted company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<JobRow>,
}

/// Body of a company creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    /// Checks the store would otherwise report less clearly.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.handle.trim().is_empty() || self.name.trim().is_empty() {
            return Err(DbError::BadRequest("handle and name must not be empty".into()));
        }
        if self.handle.chars().count() > 25 {
            return Err(DbError::BadRequest("handle is longer than 25 characters".into()));
        }
        if self.num_employees.is_some_and(|n| n < 0) {
            return Err(DbError::BadRequest("numEmployees must not be negative".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row. `equity` keeps its exact NUMERIC value and
/// serializes as a decimal string such as `"0.5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Body of a job creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), DbError> {
        if self.title.trim().is_empty() {
            return Err(DbError::BadRequest("title must not be empty".into()));
        }
        if self.salary.is_some_and(|s| s < 0) {
            return Err(DbError::BadRequest("salary must not be negative".into()));
        }
        if self.equity.is_some_and(|e| e < Decimal::ZERO || e > Decimal::ONE) {
            return Err(DbError::BadRequest("equity must be between 0 and 1".into()));
        }
        Ok(())
    }
}
