//! Loan request service

use chrono::Utc;
use validator::Validate;

use crate::{
    domain::overdue,
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, LoanStatus},
        loan::{CreateLoanRequest, LoanDetails, LoanRequest, RejectLoan, ReturnLoan},
    },
    repository::Repository,
};

use super::notifications::NotificationService;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    notifications: NotificationService,
}

impl LoansService {
    pub fn new(repository: Repository, notifications: NotificationService) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// List loans with overdue decoration, optionally filtered by status
    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<LoanDetails>> {
        let rows = self.repository.loans.list(status).await?;
        Ok(rows.into_iter().map(|r| Self::decorate(r)).collect())
    }

    /// List only overdue active loans
    pub async fn list_overdue(&self) -> AppResult<Vec<LoanDetails>> {
        let rows = self
            .repository
            .loans
            .list(Some(i16::from(LoanStatus::Approved)))
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Self::decorate(r))
            .filter(|d| d.is_overdue)
            .collect())
    }

    /// List loans for one borrower
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<LoanDetails>> {
        // Verify the user exists
        self.repository.users.get_by_id(user_id).await?;
        let rows = self.repository.loans.list_for_user(user_id).await?;
        Ok(rows.into_iter().map(|r| Self::decorate(r)).collect())
    }

    /// Create a pending loan request for a borrower
    pub async fn create(&self, data: &CreateLoanRequest) -> AppResult<LoanRequest> {
        data.validate()?;
        if data.start_date > data.end_date {
            return Err(AppError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }

        self.repository.users.get_by_id(data.user_id).await?;
        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        if EquipmentStatus::from(equipment.status) != EquipmentStatus::Ready {
            return Err(AppError::BusinessRule(format!(
                "Equipment '{}' is not available for loan",
                equipment.name
            )));
        }

        if self
            .repository
            .loans
            .has_active_conflict(data.equipment_id, data.start_date, data.end_date)
            .await?
        {
            return Err(AppError::DateConflict(format!(
                "Equipment '{}' already has a loan in that period",
                equipment.name
            )));
        }

        self.repository.loans.create(data).await
    }

    /// Approve a pending loan request; the equipment becomes borrowed
    pub async fn approve(&self, id: i32) -> AppResult<LoanRequest> {
        let loan = self.repository.loans.approve(id).await?;
        self.repository
            .equipment
            .set_status(loan.equipment_id, EquipmentStatus::Borrowed)
            .await?;

        let user = self.repository.users.get_by_id(loan.user_id).await?;
        let equipment = self.repository.equipment.get_by_id(loan.equipment_id).await?;
        self.notifications
            .loan_approved(&user.display_name, &equipment.name);

        Ok(loan)
    }

    /// Reject a pending loan request (reason required)
    pub async fn reject(&self, id: i32, data: &RejectLoan) -> AppResult<LoanRequest> {
        data.validate()?;
        let loan = self.repository.loans.reject(id, &data.reason).await?;

        let user = self.repository.users.get_by_id(loan.user_id).await?;
        let equipment = self.repository.equipment.get_by_id(loan.equipment_id).await?;
        self.notifications
            .loan_rejected(&user.display_name, &equipment.name, &data.reason);

        Ok(loan)
    }

    /// Record the return of an active loan; the equipment becomes ready
    pub async fn record_return(&self, id: i32, data: &ReturnLoan) -> AppResult<LoanRequest> {
        let loan = self
            .repository
            .loans
            .record_return(id, data.condition.as_deref())
            .await?;
        self.repository
            .equipment
            .set_status(loan.equipment_id, EquipmentStatus::Ready)
            .await?;

        let user = self.repository.users.get_by_id(loan.user_id).await?;
        let equipment = self.repository.equipment.get_by_id(loan.equipment_id).await?;
        self.notifications
            .loan_returned(&user.display_name, &equipment.name);

        Ok(loan)
    }

    /// Count active loans (for stats)
    pub async fn count_active(&self) -> AppResult<i64> {
        self.repository.loans.count_active().await
    }

    /// Count overdue active loans (for stats)
    pub async fn count_overdue(&self) -> AppResult<i64> {
        Ok(self.list_overdue().await?.len() as i64)
    }

    fn decorate(row: crate::models::loan::LoanJoinRow) -> LoanDetails {
        // Only active approved loans can be late
        let info = if LoanStatus::from(row.status) == LoanStatus::Approved {
            overdue::check_overdue(row.end_date, row.return_time, Utc::now().naive_utc())
        } else {
            None
        };
        row.into_details(info)
    }
}
