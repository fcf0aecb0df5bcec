//! Loan request API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::loan::{CreateLoanRequest, LoanDetails, LoanRequest, RejectLoan, ReturnLoan},
};

use super::AuthenticatedUser;

/// Loan list filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    /// Filter by status (0=pending, 1=approved, 2=rejected, 3=returned)
    pub status: Option<i16>,
}

/// List loans with overdue decoration
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(LoanQuery),
    responses(
        (status = 200, description = "Loan list", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    claims.require_staff()?;
    let loans = state.services.loans.list(query.status).await?;
    Ok(Json(loans))
}

/// List overdue active loans
#[utoipa::path(
    get,
    path = "/loans/overdue",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>)
    )
)]
pub async fn list_overdue_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    claims.require_staff()?;
    let loans = state.services.loans.list_overdue().await?;
    Ok(Json(loans))
}

/// Get loans for a specific user
#[utoipa::path(
    get,
    path = "/users/{id}/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's loans", body = Vec<LoanDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    claims.require_self_or_staff(user_id)?;
    let loans = state.services.loans.list_for_user(user_id).await?;
    Ok(Json(loans))
}

/// Create a loan request
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Loan request created", body = LoanRequest),
        (status = 404, description = "User or equipment not found"),
        (status = 409, description = "Equipment already on loan in that period"),
        (status = 422, description = "Equipment not available")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanRequest>)> {
    claims.require_self_or_staff(data.user_id)?;
    let loan = state.services.loans.create(&data).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Approve a pending loan request
#[utoipa::path(
    post,
    path = "/loans/{id}/approve",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan request ID")),
    responses(
        (status = 200, description = "Loan approved", body = LoanRequest),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan is not pending")
    )
)]
pub async fn approve_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanRequest>> {
    claims.require_staff()?;
    let loan = state.services.loans.approve(id).await?;
    Ok(Json(loan))
}

/// Reject a pending loan request
#[utoipa::path(
    post,
    path = "/loans/{id}/reject",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan request ID")),
    request_body = RejectLoan,
    responses(
        (status = 200, description = "Loan rejected", body = LoanRequest),
        (status = 400, description = "Missing rejection reason"),
        (status = 422, description = "Loan is not pending")
    )
)]
pub async fn reject_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<RejectLoan>,
) -> AppResult<Json<LoanRequest>> {
    claims.require_staff()?;
    let loan = state.services.loans.reject(id, &data).await?;
    Ok(Json(loan))
}

/// Record the return of an active loan
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan request ID")),
    request_body = ReturnLoan,
    responses(
        (status = 200, description = "Loan returned", body = LoanRequest),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan is not active")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<ReturnLoan>,
) -> AppResult<Json<LoanRequest>> {
    claims.require_staff()?;
    let loan = state.services.loans.record_return(id, &data).await?;
    Ok(Json(loan))
}
