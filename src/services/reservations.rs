//! Reservation lifecycle service
//!
//! Transition legality lives in `domain::lifecycle`; this service checks the
//! current status against it before issuing the guarded repository update.

use chrono::Utc;
use validator::Validate;

use crate::{
    domain::lifecycle,
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, ReservationStatus},
        loan::LoanRequest,
        reservation::{CreateReservation, RejectReservation, Reservation},
        user::UserClaims,
    },
    repository::Repository,
};

use super::notifications::NotificationService;

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    notifications: NotificationService,
}

impl ReservationsService {
    pub fn new(repository: Repository, notifications: NotificationService) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list(status).await
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list_for_user(user_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    /// Create a pending reservation for a borrower
    pub async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        data.validate()?;
        if data.start_date > data.end_date {
            return Err(AppError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }

        self.repository.users.get_by_id(data.user_id).await?;
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        if EquipmentStatus::from(equipment.status) == EquipmentStatus::Retired {
            return Err(AppError::BusinessRule(format!(
                "Equipment '{}' is retired",
                equipment.name
            )));
        }

        // At most one active loan or reservation per unit and period
        if self
            .repository
            .reservations
            .has_active_conflict(data.equipment_id, data.start_date, data.end_date)
            .await?
            || self
                .repository
                .loans
                .has_active_conflict(data.equipment_id, data.start_date, data.end_date)
                .await?
        {
            return Err(AppError::DateConflict(format!(
                "Equipment '{}' is already reserved or on loan in that period",
                equipment.name
            )));
        }

        self.repository.reservations.create(data).await
    }

    /// Approve a pending reservation
    pub async fn approve(&self, id: i32) -> AppResult<Reservation> {
        self.transition(id, ReservationStatus::Approved, None).await
    }

    /// Reject a pending reservation (reason required)
    pub async fn reject(&self, id: i32, data: &RejectReservation) -> AppResult<Reservation> {
        data.validate()?;
        self.transition(id, ReservationStatus::Rejected, Some(&data.reason))
            .await
    }

    /// Mark an approved reservation as ready for pickup
    pub async fn mark_ready(&self, id: i32) -> AppResult<Reservation> {
        self.transition(id, ReservationStatus::Ready, None).await
    }

    /// Convert a ready reservation into an approved loan.
    ///
    /// The reservation write, loan insert and equipment status change are
    /// one transaction (see `ReservationsRepository::convert_to_loan`).
    pub async fn convert_to_loan(&self, id: i32) -> AppResult<(Reservation, LoanRequest)> {
        let current = self.repository.reservations.get_by_id(id).await?;
        Self::check(
            ReservationStatus::from(current.status),
            ReservationStatus::Completed,
        )?;

        let (reservation, loan) = self.repository.reservations.convert_to_loan(id).await?;
        self.notifications
            .reservation_status_changed(reservation.id, "completed (picked up)");
        Ok((reservation, loan))
    }

    /// Cancel a non-terminal reservation. Borrowers may only cancel their
    /// own; `force` (admin) bypasses the ownership check.
    pub async fn cancel(
        &self,
        id: i32,
        claims: &UserClaims,
        force: bool,
    ) -> AppResult<Reservation> {
        let current = self.repository.reservations.get_by_id(id).await?;

        if force {
            claims.require_admin()?;
        } else if current.user_id != claims.user_id && !claims.is_staff() {
            return Err(AppError::Authorization(
                "Cannot cancel another user's reservation".to_string(),
            ));
        }

        let from = ReservationStatus::from(current.status);
        Self::check(from, ReservationStatus::Cancelled)?;

        let reservation = self
            .repository
            .reservations
            .transition(id, from, ReservationStatus::Cancelled, None)
            .await?;
        self.notifications
            .reservation_status_changed(reservation.id, "cancelled");
        Ok(reservation)
    }

    /// Expire every non-terminal reservation whose end date has passed
    pub async fn expire_sweep(&self) -> AppResult<u64> {
        let expired = self
            .repository
            .reservations
            .expire_overdue(Utc::now().date_naive())
            .await?;
        if expired > 0 {
            tracing::info!("Expired {} overdue reservations", expired);
        }
        Ok(expired)
    }

    /// Count pending reservations (for stats)
    pub async fn count_pending(&self) -> AppResult<i64> {
        self.repository.reservations.count_pending().await
    }

    async fn transition(
        &self,
        id: i32,
        to: ReservationStatus,
        reason: Option<&str>,
    ) -> AppResult<Reservation> {
        let current = self.repository.reservations.get_by_id(id).await?;
        let from = ReservationStatus::from(current.status);
        Self::check(from, to)?;

        let reservation = self
            .repository
            .reservations
            .transition(id, from, to, reason)
            .await?;
        self.notifications
            .reservation_status_changed(reservation.id, &to.to_string());
        Ok(reservation)
    }

    fn check(from: ReservationStatus, to: ReservationStatus) -> AppResult<()> {
        lifecycle::check_transition(from, to).map_err(|(from, to)| {
            AppError::InvalidTransition(format!("Cannot move a {} reservation to {}", from, to))
        })
    }
}
