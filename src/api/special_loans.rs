//! Special loan API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::special_loan::{
        ConflictCheckRequest, ConflictCheckResponse, CreateSpecialLoan, SpecialLoan,
    },
};

use super::AuthenticatedUser;

/// Special loan list filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SpecialLoanQuery {
    /// Filter by status (0=active, 1=returned, 2=cancelled)
    pub status: Option<i16>,
}

/// List special loans
#[utoipa::path(
    get,
    path = "/special-loans",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    params(SpecialLoanQuery),
    responses(
        (status = 200, description = "Special loan list", body = Vec<SpecialLoan>)
    )
)]
pub async fn list_special_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<SpecialLoanQuery>,
) -> AppResult<Json<Vec<SpecialLoan>>> {
    claims.require_staff()?;
    let loans = state.services.special_loans.list(query.status).await?;
    Ok(Json(loans))
}

/// Get special loan by ID
#[utoipa::path(
    get,
    path = "/special-loans/{id}",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Special loan ID")),
    responses(
        (status = 200, description = "Special loan details", body = SpecialLoan),
        (status = 404, description = "Special loan not found")
    )
)]
pub async fn get_special_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SpecialLoan>> {
    claims.require_staff()?;
    let loan = state.services.special_loans.get_by_id(id).await?;
    Ok(Json(loan))
}

/// Check a candidate booking for date conflicts without creating it
#[utoipa::path(
    post,
    path = "/special-loans/check-conflicts",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict check result", body = ConflictCheckResponse)
    )
)]
pub async fn check_conflicts(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<ConflictCheckRequest>,
) -> AppResult<Json<ConflictCheckResponse>> {
    claims.require_staff()?;
    let result = state.services.special_loans.check_conflicts(&data).await?;
    Ok(Json(result))
}

/// Create a special loan for a lecturer
#[utoipa::path(
    post,
    path = "/special-loans",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    request_body = CreateSpecialLoan,
    responses(
        (status = 201, description = "Special loan created", body = SpecialLoan),
        (status = 409, description = "Date conflict on requested equipment")
    )
)]
pub async fn create_special_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSpecialLoan>,
) -> AppResult<(StatusCode, Json<SpecialLoan>)> {
    claims.require_staff()?;
    let loan = state.services.special_loans.create(&data).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Record the return of an active special loan
#[utoipa::path(
    post,
    path = "/special-loans/{id}/return",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Special loan ID")),
    responses(
        (status = 200, description = "Special loan returned", body = SpecialLoan),
        (status = 422, description = "Special loan is not active")
    )
)]
pub async fn return_special_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SpecialLoan>> {
    claims.require_staff()?;
    let loan = state.services.special_loans.record_return(id).await?;
    Ok(Json(loan))
}

/// Cancel an active special loan
#[utoipa::path(
    post,
    path = "/special-loans/{id}/cancel",
    tag = "special-loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Special loan ID")),
    responses(
        (status = 200, description = "Special loan cancelled", body = SpecialLoan),
        (status = 422, description = "Special loan is not active")
    )
)]
pub async fn cancel_special_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SpecialLoan>> {
    claims.require_staff()?;
    let loan = state.services.special_loans.cancel(id).await?;
    Ok(Json(loan))
}
