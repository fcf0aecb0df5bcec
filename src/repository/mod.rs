//! Repository layer for database operations

pub mod equipment;
pub mod evaluations;
pub mod loans;
pub mod reservations;
pub mod special_loans;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub loans: loans::LoansRepository,
    pub reservations: reservations::ReservationsRepository,
    pub special_loans: special_loans::SpecialLoansRepository,
    pub evaluations: evaluations::EvaluationsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            special_loans: special_loans::SpecialLoansRepository::new(pool.clone()),
            evaluations: evaluations::EvaluationsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
