//! Reservations repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, LoanStatus, ReservationStatus},
        loan::LoanRequest,
        reservation::{CreateReservation, Reservation},
    },
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    /// List reservations, optionally by status
    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<Reservation>> {
        let rows = match status {
            Some(s) => {
                sqlx::query_as::<_, Reservation>(
                    "SELECT * FROM reservations WHERE status = $1 ORDER BY start_date, id",
                )
                .bind(s)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Reservation>(
                    "SELECT * FROM reservations ORDER BY start_date, id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// List reservations for one borrower
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE user_id = $1 ORDER BY start_date, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Whether the equipment already has a non-terminal reservation
    /// overlapping the given date range (inclusive)
    pub async fn has_active_conflict(
        &self,
        equipment_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE equipment_id = $1
                  AND status IN ($2, $3, $4)
                  AND start_date <= $6 AND $5 <= end_date
            )
            "#,
        )
        .bind(equipment_id)
        .bind(i16::from(ReservationStatus::Pending))
        .bind(i16::from(ReservationStatus::Approved))
        .bind(i16::from(ReservationStatus::Ready))
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a pending reservation
    pub async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (user_id, equipment_id, start_date, end_date, status, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.equipment_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(i16::from(ReservationStatus::Pending))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Move a reservation to a new status, guarded by the expected current
    /// status so concurrent transitions cannot race each other.
    pub async fn transition(
        &self,
        id: i32,
        from: ReservationStatus,
        to: ReservationStatus,
        reason: Option<&str>,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = $1, rejection_reason = COALESCE($2, rejection_reason), modif_date = $3
            WHERE id = $4 AND status = $5
            RETURNING *
            "#,
        )
        .bind(i16::from(to))
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .bind(i16::from(from))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::InvalidTransition(format!(
                "Reservation {} is no longer {} ({} was requested)",
                id, from, to
            ))
        })
    }

    /// Convert a ready reservation into an approved loan.
    ///
    /// The reservation update, the loan insert and the equipment status
    /// change run in one transaction, so a partial failure can never leave
    /// a completed reservation without its loan.
    pub async fn convert_to_loan(&self, id: i32) -> AppResult<(Reservation, LoanRequest)> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = $1, modif_date = $2
            WHERE id = $3 AND status = $4
            RETURNING *
            "#,
        )
        .bind(i16::from(ReservationStatus::Completed))
        .bind(now)
        .bind(id)
        .bind(i16::from(ReservationStatus::Ready))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::InvalidTransition(format!("Reservation {} is not ready for pickup", id))
        })?;

        let loan = sqlx::query_as::<_, LoanRequest>(
            r#"
            INSERT INTO loan_requests (user_id, equipment_id, start_date, end_date, status, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(reservation.user_id)
        .bind(reservation.equipment_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(i16::from(LoanStatus::Approved))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE equipment SET status = $1, modif_date = $2 WHERE id = $3")
            .bind(i16::from(EquipmentStatus::Borrowed))
            .bind(now)
            .bind(reservation.equipment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((reservation, loan))
    }

    /// Expire all non-terminal reservations whose end date has passed
    pub async fn expire_overdue(&self, today: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $1, modif_date = $2
            WHERE status IN ($3, $4, $5) AND end_date < $6
            "#,
        )
        .bind(i16::from(ReservationStatus::Expired))
        .bind(Utc::now())
        .bind(i16::from(ReservationStatus::Pending))
        .bind(i16::from(ReservationStatus::Approved))
        .bind(i16::from(ReservationStatus::Ready))
        .bind(today)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count pending reservations (for stats)
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE status = $1")
                .bind(i16::from(ReservationStatus::Pending))
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
