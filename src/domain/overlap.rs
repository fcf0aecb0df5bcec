//! Inclusive date-range overlap

use chrono::NaiveDate;

/// Whether two date ranges overlap. Boundaries are inclusive: ranges that
/// merely touch on a shared day still conflict, since the equipment cannot
/// be in two hands on the same date.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn disjoint_ranges() {
        assert!(!ranges_overlap(d(1, 1), d(1, 5), d(1, 6), d(1, 10)));
        assert!(!ranges_overlap(d(1, 6), d(1, 10), d(1, 1), d(1, 5)));
    }

    #[test]
    fn touching_endpoints_conflict() {
        assert!(ranges_overlap(d(1, 1), d(1, 5), d(1, 5), d(1, 10)));
        assert!(ranges_overlap(d(1, 5), d(1, 10), d(1, 1), d(1, 5)));
    }

    #[test]
    fn partial_and_full_overlap() {
        assert!(ranges_overlap(d(1, 1), d(1, 7), d(1, 5), d(1, 10)));
        assert!(ranges_overlap(d(1, 1), d(1, 31), d(1, 10), d(1, 12)));
        assert!(ranges_overlap(d(1, 10), d(1, 12), d(1, 1), d(1, 31)));
    }

    #[test]
    fn single_day_ranges() {
        assert!(ranges_overlap(d(1, 5), d(1, 5), d(1, 5), d(1, 5)));
        assert!(!ranges_overlap(d(1, 5), d(1, 5), d(1, 6), d(1, 6)));
    }
}
