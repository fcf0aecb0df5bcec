//! Loans repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        loan::{CreateLoanRequest, LoanJoinRow, LoanRequest},
    },
};

const JOIN_SELECT: &str = r#"
    SELECT l.id, l.user_id, u.display_name AS user_name,
           l.equipment_id, e.name AS equipment_name, e.inventory_number,
           l.start_date, l.end_date, l.return_time, l.status,
           l.rejection_reason, l.return_condition
    FROM loan_requests l
    JOIN users u ON l.user_id = u.id
    JOIN equipment e ON l.equipment_id = e.id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<LoanRequest> {
        sqlx::query_as::<_, LoanRequest>("SELECT * FROM loan_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan request {} not found", id)))
    }

    /// List loans joined with borrower/equipment, optionally by status
    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<LoanJoinRow>> {
        let rows = match status {
            Some(s) => {
                let query = format!("{} WHERE l.status = $1 ORDER BY l.end_date, l.id", JOIN_SELECT);
                sqlx::query_as::<_, LoanJoinRow>(&query)
                    .bind(s)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("{} ORDER BY l.end_date, l.id", JOIN_SELECT);
                sqlx::query_as::<_, LoanJoinRow>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// List loans for one borrower
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<LoanJoinRow>> {
        let query = format!("{} WHERE l.user_id = $1 ORDER BY l.end_date, l.id", JOIN_SELECT);
        let rows = sqlx::query_as::<_, LoanJoinRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Whether the equipment already has a pending/approved loan overlapping
    /// the given date range (inclusive)
    pub async fn has_active_conflict(
        &self,
        equipment_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM loan_requests
                WHERE equipment_id = $1
                  AND status IN ($2, $3)
                  AND start_date <= $5 AND $4 <= end_date
            )
            "#,
        )
        .bind(equipment_id)
        .bind(i16::from(LoanStatus::Pending))
        .bind(i16::from(LoanStatus::Approved))
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a pending loan request
    pub async fn create(&self, data: &CreateLoanRequest) -> AppResult<LoanRequest> {
        let row = sqlx::query_as::<_, LoanRequest>(
            r#"
            INSERT INTO loan_requests (user_id, equipment_id, start_date, end_date, return_time, status, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.equipment_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.return_time)
        .bind(i16::from(LoanStatus::Pending))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Approve a pending loan request
    pub async fn approve(&self, id: i32) -> AppResult<LoanRequest> {
        sqlx::query_as::<_, LoanRequest>(
            "UPDATE loan_requests SET status = $1 WHERE id = $2 AND status = $3 RETURNING *",
        )
        .bind(i16::from(LoanStatus::Approved))
        .bind(id)
        .bind(i16::from(LoanStatus::Pending))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule(format!("Loan request {} is not pending approval", id))
        })
    }

    /// Reject a pending loan request with a reason
    pub async fn reject(&self, id: i32, reason: &str) -> AppResult<LoanRequest> {
        sqlx::query_as::<_, LoanRequest>(
            "UPDATE loan_requests SET status = $1, rejection_reason = $2 WHERE id = $3 AND status = $4 RETURNING *",
        )
        .bind(i16::from(LoanStatus::Rejected))
        .bind(reason)
        .bind(id)
        .bind(i16::from(LoanStatus::Pending))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule(format!("Loan request {} is not pending approval", id))
        })
    }

    /// Close an approved loan as returned, recording the condition
    pub async fn record_return(&self, id: i32, condition: Option<&str>) -> AppResult<LoanRequest> {
        sqlx::query_as::<_, LoanRequest>(
            r#"
            UPDATE loan_requests
            SET status = $1, return_condition = $2, returned_date = $3
            WHERE id = $4 AND status = $5
            RETURNING *
            "#,
        )
        .bind(i16::from(LoanStatus::Returned))
        .bind(condition)
        .bind(Utc::now())
        .bind(id)
        .bind(i16::from(LoanStatus::Approved))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BusinessRule(format!("Loan request {} is not an active loan", id)))
    }

    /// Count active (approved, not yet returned) loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loan_requests WHERE status = $1")
                .bind(i16::from(LoanStatus::Approved))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count pending loan requests
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loan_requests WHERE status = $1")
                .bind(i16::from(LoanStatus::Pending))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
