//! Reservation models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Reservation record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Status (0=pending, 1=approved, 2=ready, 3=completed,
    /// 4=rejected, 5=cancelled, 6=expired)
    pub status: i16,
    pub rejection_reason: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Reject reservation request (reason is mandatory)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectReservation {
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
}

/// Cancel reservation request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CancelReservation {
    /// Admin-only variant bypassing the ownership check
    #[serde(default)]
    pub force: bool,
}
