//! Data models for Equiplend entities

pub mod enums;
pub mod equipment;
pub mod evaluation;
pub mod loan;
pub mod reservation;
pub mod special_loan;
pub mod user;
