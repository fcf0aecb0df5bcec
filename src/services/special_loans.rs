//! Special loan service

use validator::Validate;

use crate::{
    domain::overlap,
    error::{AppError, AppResult},
    models::{
        enums::SpecialLoanStatus,
        special_loan::{
            ConflictCheckRequest, ConflictCheckResponse, CreateSpecialLoan, SpecialLoan,
            SpecialLoanConflict,
        },
    },
    repository::Repository,
};

use super::notifications::NotificationService;

#[derive(Clone)]
pub struct SpecialLoansService {
    repository: Repository,
    notifications: NotificationService,
}

impl SpecialLoansService {
    pub fn new(repository: Repository, notifications: NotificationService) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<SpecialLoan>> {
        self.repository.special_loans.list(status).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<SpecialLoan> {
        self.repository.special_loans.get_by_id(id).await
    }

    /// Detect date-range conflicts between a candidate booking and
    /// existing active special loans on the same equipment numbers
    pub async fn check_conflicts(
        &self,
        request: &ConflictCheckRequest,
    ) -> AppResult<ConflictCheckResponse> {
        let existing = self
            .repository
            .special_loans
            .list_active_for_numbers(&request.equipment_numbers)
            .await?;

        let mut conflicts = Vec::new();
        for loan in &existing {
            if !overlap::ranges_overlap(
                request.start_date,
                request.end_date,
                loan.start_date,
                loan.end_date,
            ) {
                continue;
            }
            for number in &request.equipment_numbers {
                if loan.equipment_numbers.contains(number) {
                    conflicts.push(SpecialLoanConflict {
                        equipment_number: number.clone(),
                        special_loan_id: loan.id,
                        lecturer_name: loan.lecturer_name.clone(),
                        start_date: loan.start_date,
                        end_date: loan.end_date,
                    });
                }
            }
        }

        Ok(ConflictCheckResponse {
            has_conflict: !conflicts.is_empty(),
            conflicts,
        })
    }

    /// Create a special loan after checking every requested equipment
    /// number for date overlap against existing active special loans
    pub async fn create(&self, data: &CreateSpecialLoan) -> AppResult<SpecialLoan> {
        data.validate()?;
        if data.start_date > data.end_date {
            return Err(AppError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }

        let check = ConflictCheckRequest {
            equipment_numbers: data.equipment_numbers.clone(),
            start_date: data.start_date,
            end_date: data.end_date,
        };
        let result = self.check_conflicts(&check).await?;
        if let Some(first) = result.conflicts.first() {
            return Err(AppError::DateConflict(format!(
                "Equipment '{}' is already booked by {} from {} to {}",
                first.equipment_number, first.lecturer_name, first.start_date, first.end_date
            )));
        }

        let loan = self.repository.special_loans.create(data).await?;
        self.notifications
            .special_loan_created(&loan.lecturer_name, loan.quantity);
        Ok(loan)
    }

    /// Close an active special loan as returned
    pub async fn record_return(&self, id: i32) -> AppResult<SpecialLoan> {
        self.repository
            .special_loans
            .close(id, SpecialLoanStatus::Returned)
            .await
    }

    /// Cancel an active special loan
    pub async fn cancel(&self, id: i32) -> AppResult<SpecialLoan> {
        self.repository
            .special_loans
            .close(id, SpecialLoanStatus::Cancelled)
            .await
    }
}
