//! Loan request models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Loan request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanRequest {
    pub id: i32,
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Agreed time of return on the end date, when one was set
    pub return_time: Option<NaiveTime>,
    /// Status (0=pending, 1=approved, 2=rejected, 3=returned)
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub return_condition: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

/// Loan with borrower/equipment names and overdue decoration for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub inventory_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub return_time: Option<NaiveTime>,
    /// Status (0=pending, 1=approved, 2=rejected, 3=returned)
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub return_condition: Option<String>,
    pub is_overdue: bool,
    /// Calendar days past the end date, present only when overdue
    pub days_overdue: Option<i64>,
    /// Display severity bucket ("mild", "moderate", "severe")
    pub severity: Option<String>,
}

/// Joined row backing [`LoanDetails`], before overdue decoration
#[derive(Debug, Clone, FromRow)]
pub struct LoanJoinRow {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub inventory_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub return_time: Option<NaiveTime>,
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub return_condition: Option<String>,
}

impl LoanJoinRow {
    /// Attach overdue classification for display
    pub fn into_details(self, overdue: Option<crate::domain::overdue::OverdueInfo>) -> LoanDetails {
        LoanDetails {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            equipment_id: self.equipment_id,
            equipment_name: self.equipment_name,
            inventory_number: self.inventory_number,
            start_date: self.start_date,
            end_date: self.end_date,
            return_time: self.return_time,
            status: self.status,
            rejection_reason: self.rejection_reason,
            return_condition: self.return_condition,
            is_overdue: overdue.is_some(),
            days_overdue: overdue.map(|o| o.days_overdue),
            severity: overdue.map(|o| o.severity.to_string()),
        }
    }
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoanRequest {
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub return_time: Option<NaiveTime>,
}

/// Reject loan request (reason is mandatory)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectLoan {
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
}

/// Record a loan return
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnLoan {
    /// Condition of the equipment as observed at return
    pub condition: Option<String>,
}
