// File: ./src/calendar.rs
// Pure month-grid arithmetic for the calendar view and schedule keys.
//
// Months are 0-indexed (0 = January .. 11 = December) throughout this
// module; that is the contract the grid and the date-key format were
// specified against. `format_date` produces the canonical `YYYY-MM-DD`
// key used by the schedule mapping, so both sides must agree exactly.
use chrono::{Datelike, Local, NaiveDate};

/// One cell of the month grid: either a leading blank (before day 1) or a
/// day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(d) => Some(*d),
        }
    }
}

/// First day of the given month. Panics on a month index outside 0..=11,
/// which is a programming error.
fn first_of_month(year: i32, month0: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap()
}

/// Number of days in the month (28..=31), computed as the last valid
/// calendar day: the day before the first of the following month.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month0) = if month0 == 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    };
    first_of_month(next_year, next_month0)
        .pred_opt()
        .unwrap()
        .day()
}

/// Weekday index of day 1 of the month: 0 = Sunday .. 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    first_of_month(year, month0).weekday().num_days_from_sunday()
}

/// Canonical `YYYY-MM-DD` date key, zero-padded. Schedule lookups use
/// exactly this string as the mapping key.
pub fn format_date(year: i32, month0: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month0 + 1, day)
}

/// Parses a canonical date key back into a `NaiveDate`.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Builds the ordered cell sequence for one month: leading blanks up to the
/// weekday of day 1, then one cell per day. Pure and cheap, so callers
/// rebuild it whenever the displayed year/month changes.
pub fn build_grid(year: i32, month0: u32) -> Vec<GridCell> {
    let blanks = first_weekday_of_month(year, month0) as usize;
    let days = days_in_month(year, month0);

    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat_n(GridCell::Blank, blanks));
    cells.extend((1..=days).map(GridCell::Day));
    cells
}

/// Today's date as (year, month0), for the initial calendar position.
pub fn current_year_month0() -> (i32, u32) {
    let today = Local::now().date_naive();
    (today.year(), today.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 0), 31); // January
        assert_eq!(days_in_month(2024, 1), 29); // February, leap year
        assert_eq!(days_in_month(2023, 1), 28); // February, common year
        assert_eq!(days_in_month(2024, 3), 30); // April
        assert_eq!(days_in_month(2024, 11), 31); // December wraps the year
    }

    #[test]
    fn test_century_leap_rules() {
        assert_eq!(days_in_month(2000, 1), 29); // divisible by 400
        assert_eq!(days_in_month(1900, 1), 28); // divisible by 100 only
    }

    #[test]
    fn test_first_weekday_of_month() {
        // Jan 2024 starts on a Monday.
        assert_eq!(first_weekday_of_month(2024, 0), 1);
        // Sep 2024 starts on a Sunday.
        assert_eq!(first_weekday_of_month(2024, 8), 0);
        // Jun 2024 starts on a Saturday.
        assert_eq!(first_weekday_of_month(2024, 5), 6);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(2024, 0, 5), "2024-01-05");
        assert_eq!(format_date(2024, 11, 31), "2024-12-31");
        assert_eq!(format_date(2024, 2, 10), "2024-03-10");
    }

    #[test]
    fn test_parse_roundtrip() {
        let key = format_date(2024, 2, 10);
        let date = parse_date_key(&key).unwrap();
        assert_eq!((date.year(), date.month0(), date.day()), (2024, 2, 10));
        assert!(parse_date_key("not-a-date").is_none());
    }

    #[test]
    fn test_build_grid_shape() {
        // Jan 2024: 1 leading blank (Monday start), then 31 days.
        let grid = build_grid(2024, 0);
        assert_eq!(grid.len(), 32);
        assert_eq!(grid[0], GridCell::Blank);
        assert_eq!(grid[1], GridCell::Day(1));
        assert_eq!(grid[31], GridCell::Day(31));
    }

    #[test]
    fn test_build_grid_no_blanks_on_sunday_start() {
        // Sep 2024 starts on a Sunday: no leading blanks.
        let grid = build_grid(2024, 8);
        assert_eq!(grid[0], GridCell::Day(1));
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn test_build_grid_is_rebuildable() {
        assert_eq!(build_grid(2024, 1), build_grid(2024, 1));
    }
}
