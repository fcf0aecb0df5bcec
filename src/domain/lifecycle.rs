//! Reservation lifecycle rules
//!
//! The lifecycle is linear (`pending -> approved -> ready -> completed`)
//! with `rejected`, `cancelled` and `expired` as early exits. A reservation
//! never moves backward and terminal states admit no further transitions.

use crate::models::enums::ReservationStatus;

/// Whether a status admits no further transitions
pub fn is_terminal(status: ReservationStatus) -> bool {
    matches!(
        status,
        ReservationStatus::Completed
            | ReservationStatus::Rejected
            | ReservationStatus::Cancelled
            | ReservationStatus::Expired
    )
}

/// Whether `from -> to` is a legal lifecycle transition
pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::*;

    match (from, to) {
        // Forward steps
        (Pending, Approved) => true,
        (Approved, Ready) => true,
        (Ready, Completed) => true,
        // Rejection only applies to requests still awaiting review
        (Pending, Rejected) => true,
        // Cancel and expire are reachable from any non-terminal state
        (Pending | Approved | Ready, Cancelled) => true,
        (Pending | Approved | Ready, Expired) => true,
        _ => false,
    }
}

/// Check a transition, returning the blocked pair for error reporting
pub fn check_transition(
    from: ReservationStatus,
    to: ReservationStatus,
) -> Result<(), (ReservationStatus, ReservationStatus)> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReservationStatus::*;

    #[test]
    fn forward_path_is_legal() {
        assert!(can_transition(Pending, Approved));
        assert!(can_transition(Approved, Ready));
        assert!(can_transition(Ready, Completed));
    }

    #[test]
    fn no_backward_moves() {
        assert!(!can_transition(Approved, Pending));
        assert!(!can_transition(Ready, Approved));
        assert!(!can_transition(Completed, Ready));
    }

    #[test]
    fn no_skipping_states() {
        assert!(!can_transition(Pending, Ready));
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Approved, Completed));
    }

    #[test]
    fn cancel_reachable_only_from_non_terminal() {
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Approved, Cancelled));
        assert!(can_transition(Ready, Cancelled));
        assert!(!can_transition(Completed, Cancelled));
        assert!(!can_transition(Rejected, Cancelled));
        assert!(!can_transition(Expired, Cancelled));
        assert!(!can_transition(Cancelled, Cancelled));
    }

    #[test]
    fn reject_only_from_pending() {
        assert!(can_transition(Pending, Rejected));
        assert!(!can_transition(Approved, Rejected));
        assert!(!can_transition(Ready, Rejected));
        assert!(!can_transition(Completed, Rejected));
    }

    #[test]
    fn expire_reachable_from_non_terminal() {
        assert!(can_transition(Pending, Expired));
        assert!(can_transition(Approved, Expired));
        assert!(can_transition(Ready, Expired));
        assert!(!can_transition(Completed, Expired));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for terminal in [Completed, Rejected, Cancelled, Expired] {
            assert!(is_terminal(terminal));
            for to in [Pending, Approved, Ready, Completed, Rejected, Cancelled, Expired] {
                assert!(!can_transition(terminal, to), "{:?} -> {:?}", terminal, to);
            }
        }
    }
}
