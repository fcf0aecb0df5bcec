//! Evaluations repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::evaluation::{CreateEvaluation, Evaluation, EvaluationSummary},
};

#[derive(Clone)]
pub struct EvaluationsRepository {
    pool: Pool<Postgres>,
}

impl EvaluationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all evaluations
    pub async fn list(&self) -> AppResult<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, Evaluation>(
            "SELECT * FROM evaluations ORDER BY crea_date DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Whether an evaluation already exists for a loan
    pub async fn exists_for_loan(&self, loan_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM evaluations WHERE loan_id = $1)")
                .bind(loan_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create an evaluation. The unique index on loan_id backs the
    /// one-evaluation-per-loan rule against concurrent submissions.
    pub async fn create(&self, data: &CreateEvaluation) -> AppResult<Evaluation> {
        let row = sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations (loan_id, rating, suggestions, category_scores, crea_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.loan_id)
        .bind(data.rating)
        .bind(&data.suggestions)
        .bind(&data.category_scores)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Loan {} has already been evaluated", data.loan_id))
            }
            _ => AppError::Database(e),
        })?;
        Ok(row)
    }

    /// Aggregate count and average rating
    pub async fn summary(&self) -> AppResult<EvaluationSummary> {
        let row: (i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), AVG(rating)::double precision FROM evaluations",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(EvaluationSummary {
            count: row.0,
            average_rating: row.1,
        })
    }
}
