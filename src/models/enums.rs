//! Shared domain status enums
//!
//! Statuses are stored as SMALLINT codes in PostgreSQL; every enum carries
//! lossless `From<i16>` conversions in both directions with an explicit
//! fallback for unknown codes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum EquipmentStatus {
    Ready = 0,
    Borrowed = 1,
    Maintenance = 2,
    Retired = 3,
}

impl From<i16> for EquipmentStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => EquipmentStatus::Borrowed,
            2 => EquipmentStatus::Maintenance,
            3 => EquipmentStatus::Retired,
            _ => EquipmentStatus::Ready,
        }
    }
}

impl From<EquipmentStatus> for i16 {
    fn from(s: EquipmentStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::Ready => "ready",
            EquipmentStatus::Borrowed => "borrowed",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Retired => "retired",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Loan request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum LoanStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
    Returned = 3,
}

impl From<i16> for LoanStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => LoanStatus::Approved,
            2 => LoanStatus::Rejected,
            3 => LoanStatus::Returned,
            _ => LoanStatus::Pending,
        }
    }
}

impl From<LoanStatus> for i16 {
    fn from(s: LoanStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Returned => "returned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Reservation lifecycle status
///
/// Linear lifecycle `pending -> approved -> ready -> completed` with
/// `rejected`, `cancelled` and `expired` as terminal exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum ReservationStatus {
    Pending = 0,
    Approved = 1,
    Ready = 2,
    Completed = 3,
    Rejected = 4,
    Cancelled = 5,
    Expired = 6,
}

impl From<i16> for ReservationStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ReservationStatus::Approved,
            2 => ReservationStatus::Ready,
            3 => ReservationStatus::Completed,
            4 => ReservationStatus::Rejected,
            5 => ReservationStatus::Cancelled,
            6 => ReservationStatus::Expired,
            _ => ReservationStatus::Pending,
        }
    }
}

impl From<ReservationStatus> for i16 {
    fn from(s: ReservationStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Ready => "ready",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Expired => "expired",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SpecialLoanStatus
// ---------------------------------------------------------------------------

/// Special (bulk lecturer) loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum SpecialLoanStatus {
    Active = 0,
    Returned = 1,
    Cancelled = 2,
}

impl From<i16> for SpecialLoanStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => SpecialLoanStatus::Returned,
            2 => SpecialLoanStatus::Cancelled,
            _ => SpecialLoanStatus::Active,
        }
    }
}

impl From<SpecialLoanStatus> for i16 {
    fn from(s: SpecialLoanStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for SpecialLoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SpecialLoanStatus::Active => "active",
            SpecialLoanStatus::Returned => "returned",
            SpecialLoanStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role codes (stored in users.role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum UserRole {
    Admin = 0,
    Staff = 1,
    Borrower = 2,
    Lecturer = 3,
}

impl From<i16> for UserRole {
    fn from(v: i16) -> Self {
        match v {
            0 => UserRole::Admin,
            1 => UserRole::Staff,
            3 => UserRole::Lecturer,
            _ => UserRole::Borrower,
        }
    }
}

impl From<UserRole> for i16 {
    fn from(r: UserRole) -> Self {
        r as i16
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Borrower => "borrower",
            UserRole::Lecturer => "lecturer",
        };
        write!(f, "{}", label)
    }
}
