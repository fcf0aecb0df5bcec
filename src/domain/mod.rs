//! Pure business rules
//!
//! Stateless functions shared by services: reservation lifecycle legality,
//! overdue classification and date-range overlap. Kept free of I/O so they
//! can be unit-tested directly.

pub mod lifecycle;
pub mod overdue;
pub mod overlap;
