//! Evaluation API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::evaluation::{CreateEvaluation, Evaluation, EvaluationSummary},
};

use super::AuthenticatedUser;

/// List evaluations
#[utoipa::path(
    get,
    path = "/evaluations",
    tag = "evaluations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Evaluation list", body = Vec<Evaluation>)
    )
)]
pub async fn list_evaluations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Evaluation>>> {
    claims.require_staff()?;
    let evaluations = state.services.evaluations.list().await?;
    Ok(Json(evaluations))
}

/// Aggregate evaluation statistics
#[utoipa::path(
    get,
    path = "/evaluations/summary",
    tag = "evaluations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Evaluation summary", body = EvaluationSummary)
    )
)]
pub async fn evaluation_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<EvaluationSummary>> {
    claims.require_staff()?;
    let summary = state.services.evaluations.summary().await?;
    Ok(Json(summary))
}

/// Submit an evaluation for a returned loan
#[utoipa::path(
    post,
    path = "/evaluations",
    tag = "evaluations",
    security(("bearer_auth" = [])),
    request_body = CreateEvaluation,
    responses(
        (status = 201, description = "Evaluation created", body = Evaluation),
        (status = 409, description = "Loan already evaluated"),
        (status = 422, description = "Loan is not returned")
    )
)]
pub async fn create_evaluation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEvaluation>,
) -> AppResult<(StatusCode, Json<Evaluation>)> {
    let evaluation = state.services.evaluations.create(&claims, &data).await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}
