//! Special loans repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::SpecialLoanStatus,
        special_loan::{CreateSpecialLoan, SpecialLoan},
    },
};

#[derive(Clone)]
pub struct SpecialLoansRepository {
    pool: Pool<Postgres>,
}

impl SpecialLoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get special loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<SpecialLoan> {
        sqlx::query_as::<_, SpecialLoan>("SELECT * FROM special_loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Special loan {} not found", id)))
    }

    /// List special loans, optionally by status
    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<SpecialLoan>> {
        let rows = match status {
            Some(s) => {
                sqlx::query_as::<_, SpecialLoan>(
                    "SELECT * FROM special_loans WHERE status = $1 ORDER BY start_date, id",
                )
                .bind(s)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SpecialLoan>(
                    "SELECT * FROM special_loans ORDER BY start_date, id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Active special loans covering any of the given equipment numbers.
    /// Date filtering is left to the caller; the array-overlap operator
    /// narrows the scan to candidate rows.
    pub async fn list_active_for_numbers(
        &self,
        equipment_numbers: &[String],
    ) -> AppResult<Vec<SpecialLoan>> {
        let rows = sqlx::query_as::<_, SpecialLoan>(
            r#"
            SELECT * FROM special_loans
            WHERE status = $1 AND equipment_numbers && $2
            ORDER BY start_date, id
            "#,
        )
        .bind(i16::from(SpecialLoanStatus::Active))
        .bind(equipment_numbers)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create an active special loan
    pub async fn create(&self, data: &CreateSpecialLoan) -> AppResult<SpecialLoan> {
        let quantity = data.equipment_numbers.len() as i32;
        let row = sqlx::query_as::<_, SpecialLoan>(
            r#"
            INSERT INTO special_loans
                (lecturer_name, category_id, quantity, equipment_numbers, start_date, end_date, purpose, status, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.lecturer_name)
        .bind(data.category_id)
        .bind(quantity)
        .bind(&data.equipment_numbers)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.purpose)
        .bind(i16::from(SpecialLoanStatus::Active))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Close an active special loan with the given terminal status
    pub async fn close(&self, id: i32, status: SpecialLoanStatus) -> AppResult<SpecialLoan> {
        sqlx::query_as::<_, SpecialLoan>(
            "UPDATE special_loans SET status = $1 WHERE id = $2 AND status = $3 RETURNING *",
        )
        .bind(i16::from(status))
        .bind(id)
        .bind(i16::from(SpecialLoanStatus::Active))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BusinessRule(format!("Special loan {} is not active", id)))
    }
}
