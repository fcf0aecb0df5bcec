//! Reservation API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        loan::LoanRequest,
        reservation::{CancelReservation, CreateReservation, RejectReservation, Reservation},
    },
};

use super::AuthenticatedUser;

/// Reservation list filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReservationQuery {
    /// Filter by status (0=pending .. 6=expired)
    pub status: Option<i16>,
}

/// Conversion outcome: the completed reservation and the loan it produced
#[derive(Serialize, ToSchema)]
pub struct ConvertResponse {
    pub reservation: Reservation,
    pub loan: LoanRequest,
}

/// Expire-sweep outcome
#[derive(Serialize, ToSchema)]
pub struct ExpireSweepResponse {
    pub expired: u64,
}

/// List reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(ReservationQuery),
    responses(
        (status = 200, description = "Reservation list", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    if claims.is_staff() {
        let reservations = state.services.reservations.list(query.status).await?;
        Ok(Json(reservations))
    } else {
        // Borrowers only see their own
        let reservations = state
            .services
            .reservations
            .list_for_user(claims.user_id)
            .await?;
        Ok(Json(reservations))
    }
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.services.reservations.get_by_id(id).await?;
    claims.require_self_or_staff(reservation.user_id)?;
    Ok(Json(reservation))
}

/// Create a reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 404, description = "User or equipment not found"),
        (status = 409, description = "Equipment already reserved or on loan in that period")
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    claims.require_self_or_staff(data.user_id)?;
    let reservation = state.services.reservations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Approve a pending reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/approve",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation approved", body = Reservation),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn approve_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    claims.require_staff()?;
    let reservation = state.services.reservations.approve(id).await?;
    Ok(Json(reservation))
}

/// Reject a pending reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/reject",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = RejectReservation,
    responses(
        (status = 200, description = "Reservation rejected", body = Reservation),
        (status = 400, description = "Missing rejection reason"),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn reject_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<RejectReservation>,
) -> AppResult<Json<Reservation>> {
    claims.require_staff()?;
    let reservation = state.services.reservations.reject(id, &data).await?;
    Ok(Json(reservation))
}

/// Mark an approved reservation as ready for pickup
#[utoipa::path(
    post,
    path = "/reservations/{id}/ready",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation ready", body = Reservation),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn mark_reservation_ready(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    claims.require_staff()?;
    let reservation = state.services.reservations.mark_ready(id).await?;
    Ok(Json(reservation))
}

/// Convert a ready reservation into an approved loan at pickup
#[utoipa::path(
    post,
    path = "/reservations/{id}/convert",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation completed, loan created", body = ConvertResponse),
        (status = 422, description = "Reservation is not ready")
    )
)]
pub async fn convert_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ConvertResponse>> {
    claims.require_staff()?;
    let (reservation, loan) = state.services.reservations.convert_to_loan(id).await?;
    Ok(Json(ConvertResponse { reservation, loan }))
}

/// Cancel a non-terminal reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = CancelReservation,
    responses(
        (status = 200, description = "Reservation cancelled", body = Reservation),
        (status = 403, description = "Not the owner"),
        (status = 422, description = "Reservation is terminal")
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CancelReservation>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .reservations
        .cancel(id, &claims, data.force)
        .await?;
    Ok(Json(reservation))
}

/// Expire all reservations whose end date has passed
#[utoipa::path(
    post,
    path = "/reservations/expire-sweep",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sweep done", body = ExpireSweepResponse)
    )
)]
pub async fn expire_sweep(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ExpireSweepResponse>> {
    claims.require_staff()?;
    let expired = state.services.reservations.expire_sweep().await?;
    Ok(Json(ExpireSweepResponse { expired }))
}
