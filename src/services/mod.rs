//! Business logic services

pub mod equipment;
pub mod evaluations;
pub mod export;
pub mod loans;
pub mod notifications;
pub mod reservations;
pub mod special_loans;
pub mod stats;
pub mod users;

use crate::{config::WebhookConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub loans: loans::LoansService,
    pub reservations: reservations::ReservationsService,
    pub special_loans: special_loans::SpecialLoansService,
    pub evaluations: evaluations::EvaluationsService,
    pub users: users::UsersService,
    pub notifications: notifications::NotificationService,
    pub export: export::ExportService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, webhook_config: WebhookConfig) -> Self {
        let notifications = notifications::NotificationService::new(webhook_config);
        let loans = loans::LoansService::new(repository.clone(), notifications.clone());

        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(
                repository.clone(),
                notifications.clone(),
            ),
            special_loans: special_loans::SpecialLoansService::new(
                repository.clone(),
                notifications.clone(),
            ),
            evaluations: evaluations::EvaluationsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            stats: stats::StatsService::new(repository, loans.clone()),
            loans,
            notifications,
            export: export::ExportService::new(),
        }
    }
}
