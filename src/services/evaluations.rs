//! Evaluation service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        evaluation::{CreateEvaluation, Evaluation, EvaluationSummary},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EvaluationsService {
    repository: Repository,
}

impl EvaluationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Evaluation>> {
        self.repository.evaluations.list().await
    }

    pub async fn summary(&self) -> AppResult<EvaluationSummary> {
        self.repository.evaluations.summary().await
    }

    /// Submit an evaluation for a returned loan. One evaluation per loan;
    /// only the borrower (or staff) may submit.
    pub async fn create(
        &self,
        claims: &UserClaims,
        data: &CreateEvaluation,
    ) -> AppResult<Evaluation> {
        data.validate()?;

        if let Some(scores) = &data.category_scores {
            validate_category_scores(scores)?;
        }

        let loan = self.repository.loans.get_by_id(data.loan_id).await?;
        claims.require_self_or_staff(loan.user_id)?;

        if LoanStatus::from(loan.status) != LoanStatus::Returned {
            return Err(AppError::BusinessRule(
                "Only returned loans can be evaluated".to_string(),
            ));
        }

        if self.repository.evaluations.exists_for_loan(data.loan_id).await? {
            return Err(AppError::Conflict(format!(
                "Loan {} has already been evaluated",
                data.loan_id
            )));
        }

        self.repository.evaluations.create(data).await
    }
}

/// Category scores must be a flat map of name -> integer 1..5
fn validate_category_scores(scores: &serde_json::Value) -> AppResult<()> {
    let map = scores.as_object().ok_or_else(|| {
        AppError::Validation("Category scores must be an object".to_string())
    })?;
    for (name, value) in map {
        match value.as_i64() {
            Some(v) if (1..=5).contains(&v) => {}
            _ => {
                return Err(AppError::Validation(format!(
                    "Category score '{}' must be an integer between 1 and 5",
                    name
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_valid_scores() {
        assert!(validate_category_scores(&json!({"condition": 5, "usability": 3})).is_ok());
    }

    #[test]
    fn rejects_out_of_range_scores() {
        assert!(validate_category_scores(&json!({"condition": 0})).is_err());
        assert!(validate_category_scores(&json!({"condition": 6})).is_err());
    }

    #[test]
    fn rejects_non_integer_scores() {
        assert!(validate_category_scores(&json!({"condition": "good"})).is_err());
        assert!(validate_category_scores(&json!([1, 2, 3])).is_err());
    }
}
