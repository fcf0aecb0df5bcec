//! Loan evaluation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Evaluation submitted by a borrower for a returned loan
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Evaluation {
    pub id: i32,
    pub loan_id: i32,
    /// Overall rating, 1 to 5
    pub rating: i16,
    pub suggestions: Option<String>,
    /// Per-category scores, category name -> 1..5
    #[schema(value_type = Object)]
    pub category_scores: Option<serde_json::Value>,
    pub crea_date: DateTime<Utc>,
}

/// Create evaluation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluation {
    pub loan_id: i32,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    pub suggestions: Option<String>,
    #[schema(value_type = Object)]
    pub category_scores: Option<serde_json::Value>,
}

/// Aggregate evaluation statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluationSummary {
    pub count: i64,
    pub average_rating: Option<f64>,
}
