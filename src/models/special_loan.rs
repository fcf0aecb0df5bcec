//! Special (bulk lecturer) loan models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Special loan record: a bulk, staff-initiated loan for a lecturer
/// outside the normal per-item request flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SpecialLoan {
    pub id: i32,
    /// Lecturer name (not a system user)
    pub lecturer_name: String,
    pub category_id: Option<i32>,
    pub quantity: i32,
    /// Inventory numbers of the equipment units covered
    pub equipment_numbers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: Option<String>,
    /// Status (0=active, 1=returned, 2=cancelled)
    pub status: i16,
    pub crea_date: DateTime<Utc>,
}

/// Create special loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpecialLoan {
    #[validate(length(min = 1, message = "Lecturer name is required"))]
    pub lecturer_name: String,
    pub category_id: Option<i32>,
    #[validate(length(min = 1, message = "At least one equipment number is required"))]
    pub equipment_numbers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: Option<String>,
}

/// Conflict check request for a candidate booking
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConflictCheckRequest {
    pub equipment_numbers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One detected conflict against an existing active special loan
#[derive(Debug, Serialize, ToSchema)]
pub struct SpecialLoanConflict {
    pub equipment_number: String,
    pub special_loan_id: i32,
    pub lecturer_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Conflict check response
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub conflicts: Vec<SpecialLoanConflict>,
}
