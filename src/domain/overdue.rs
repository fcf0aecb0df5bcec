//! Overdue loan classification

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

/// Display severity bucket for an overdue loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverdueSeverity {
    Mild,
    Moderate,
    Severe,
}

impl std::fmt::Display for OverdueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OverdueSeverity::Mild => "mild",
            OverdueSeverity::Moderate => "moderate",
            OverdueSeverity::Severe => "severe",
        };
        write!(f, "{}", label)
    }
}

/// Overdue classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdueInfo {
    /// Calendar days elapsed since the loan end date
    pub days_overdue: i64,
    pub severity: OverdueSeverity,
}

/// Classify a loan deadline against `now`.
///
/// The deadline is `end_date` at `return_time`, or the end of that day when
/// no return time was agreed. A loan is overdue only when the deadline is
/// strictly in the past; `days_overdue` counts whole calendar days since
/// the end date.
pub fn check_overdue(
    end_date: NaiveDate,
    return_time: Option<NaiveTime>,
    now: NaiveDateTime,
) -> Option<OverdueInfo> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
    let deadline = end_date.and_time(return_time.unwrap_or(end_of_day));

    if deadline >= now {
        return None;
    }

    let days_overdue = (now.date() - end_date).num_days().max(0);
    Some(OverdueInfo {
        days_overdue,
        severity: severity_for_days(days_overdue),
    })
}

/// Severity bucketing by elapsed days, purely for display styling
pub fn severity_for_days(days: i64) -> OverdueSeverity {
    if days >= 7 {
        OverdueSeverity::Severe
    } else if days >= 3 {
        OverdueSeverity::Moderate
    } else {
        OverdueSeverity::Mild
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn two_days_past_end_date() {
        // end_date = 2024-01-01, no return_time, now = 2024-01-03
        let info = check_overdue(date(2024, 1, 1), None, at(2024, 1, 3, 10, 0)).unwrap();
        assert_eq!(info.days_overdue, 2);
        assert_eq!(info.severity, OverdueSeverity::Mild);
    }

    #[test]
    fn future_end_date_is_not_overdue() {
        assert!(check_overdue(date(2024, 1, 10), None, at(2024, 1, 3, 10, 0)).is_none());
    }

    #[test]
    fn not_overdue_on_the_end_date_itself() {
        // Without a return time the borrower has until end of day
        assert!(check_overdue(date(2024, 1, 1), None, at(2024, 1, 1, 23, 59)).is_none());
    }

    #[test]
    fn return_time_makes_same_day_overdue() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let info = check_overdue(date(2024, 1, 1), Some(noon), at(2024, 1, 1, 14, 0)).unwrap();
        assert_eq!(info.days_overdue, 0);
        assert_eq!(info.severity, OverdueSeverity::Mild);
    }

    #[test]
    fn deadline_exactly_now_is_not_overdue() {
        // Strictly-in-the-past rule: the deadline instant itself is on time
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(check_overdue(date(2024, 1, 1), Some(noon), at(2024, 1, 1, 12, 0)).is_none());
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(severity_for_days(0), OverdueSeverity::Mild);
        assert_eq!(severity_for_days(2), OverdueSeverity::Mild);
        assert_eq!(severity_for_days(3), OverdueSeverity::Moderate);
        assert_eq!(severity_for_days(6), OverdueSeverity::Moderate);
        assert_eq!(severity_for_days(7), OverdueSeverity::Severe);
        assert_eq!(severity_for_days(30), OverdueSeverity::Severe);
    }

    #[test]
    fn week_late_is_severe() {
        let info = check_overdue(date(2024, 1, 1), None, at(2024, 1, 8, 8, 0)).unwrap();
        assert_eq!(info.days_overdue, 7);
        assert_eq!(info.severity, OverdueSeverity::Severe);
    }
}
