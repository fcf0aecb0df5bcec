//! Statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::enums::EquipmentStatus, repository::Repository};

use super::loans::LoansService;

/// Equipment counts by status
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentStats {
    pub ready: i64,
    pub borrowed: i64,
    pub maintenance: i64,
    pub retired: i64,
}

/// Loan counts
#[derive(Debug, Serialize, ToSchema)]
pub struct LoanStats {
    pub pending: i64,
    pub active: i64,
    pub overdue: i64,
}

/// Dashboard statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub equipment: EquipmentStats,
    pub loans: LoanStats,
    pub pending_reservations: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    loans: LoansService,
}

impl StatsService {
    pub fn new(repository: Repository, loans: LoansService) -> Self {
        Self { repository, loans }
    }

    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let equipment = EquipmentStats {
            ready: self
                .repository
                .equipment
                .count_by_status(EquipmentStatus::Ready)
                .await?,
            borrowed: self
                .repository
                .equipment
                .count_by_status(EquipmentStatus::Borrowed)
                .await?,
            maintenance: self
                .repository
                .equipment
                .count_by_status(EquipmentStatus::Maintenance)
                .await?,
            retired: self
                .repository
                .equipment
                .count_by_status(EquipmentStatus::Retired)
                .await?,
        };

        let loans = LoanStats {
            pending: self.repository.loans.count_pending().await?,
            active: self.repository.loans.count_active().await?,
            overdue: self.loans.count_overdue().await?,
        };

        Ok(StatsResponse {
            equipment,
            loans,
            pending_reservations: self.repository.reservations.count_pending().await?,
        })
    }
}
