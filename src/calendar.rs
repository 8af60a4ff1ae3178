//! Proleptic Gregorian day arithmetic.
//!
//! Days are counted from the Unix epoch (1970-01-01 is day 0). The civil
//! conversions follow Howard Hinnant's `days_from_civil` / `civil_from_days`
//! algorithms, which are exact for every year this crate accepts.

use crate::consts::{DAYS_PER_WEEK, JANUARY, MONTHS_PER_YEAR};

/// Days from 0000-03-01 to 1970-01-01
const EPOCH_SHIFT: i64 = 719_468;
/// Days in a 400-year Gregorian era
const DAYS_PER_ERA: i64 = 146_097;
/// 1970-01-01 was a Thursday; offset so that Monday maps to 0
const EPOCH_WEEKDAY_OFFSET: i64 = 3;
/// January 4th always falls in ISO week 1
const FIRST_WEEK_ANCHOR_DAY: u8 = 4;

/// Days since the epoch for a civil date. `month` and `day` must already be in range.
pub const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let m = month as i64;
    let y = if m <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // [0, 399]
    let mp = (m + 9) % MONTHS_PER_YEAR; // March = 0
    let doy = (153 * mp + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT
}

/// Civil `(year, month, day)` for a count of days since the epoch.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let day = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let month = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// ISO weekday for a day count, Monday = 0 through Sunday = 6.
pub const fn weekday_from_days(days: i64) -> i64 {
    (days + EPOCH_WEEKDAY_OFFSET).rem_euclid(DAYS_PER_WEEK)
}

/// Day count of the Monday that starts ISO week 1 of `year`.
pub const fn iso_week_start(year: i64) -> i64 {
    let anchor = days_from_civil(year, JANUARY, FIRST_WEEK_ANCHOR_DAY);
    anchor - weekday_from_days(anchor)
}

/// Number of ISO weeks (52 or 53) in `year`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn weeks_in_year(year: i64) -> u8 {
    ((iso_week_start(year + 1) - iso_week_start(year)) / DAYS_PER_WEEK) as u8
}

/// ISO `(week_year, week)` of the week containing `days`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn iso_week_from_days(days: i64) -> (i64, u8) {
    let monday = days - weekday_from_days(days);
    // the week belongs to the year its Thursday falls in
    let (week_year, _, _) = civil_from_days(monday + 3);
    let week = (monday - iso_week_start(week_year)) / DAYS_PER_WEEK + 1;
    (week_year, week as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_known_days() {
        // 2014-07-08 is 1404777600000 ms
        assert_eq!(days_from_civil(2014, 7, 8), 16_259);
        assert_eq!(civil_from_days(16_259), (2014, 7, 8));
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        assert_eq!(days_from_civil(1, 1, 1), -719_162);
        assert_eq!(civil_from_days(-719_162), (1, 1, 1));
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
    }

    #[test]
    fn test_civil_round_trip_across_leap_days() {
        for days in (-800_000..800_000).step_by(997) {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days, "day {days} -> {y}-{m}-{d}");
        }
    }

    #[test]
    fn test_weekday() {
        // 1970-01-01 was a Thursday
        assert_eq!(weekday_from_days(0), 3);
        // 2014-07-07 was a Monday
        assert_eq!(weekday_from_days(days_from_civil(2014, 7, 7)), 0);
        // 0001-01-01 was a Monday
        assert_eq!(weekday_from_days(days_from_civil(1, 1, 1)), 0);
    }

    #[test]
    fn test_iso_week_start() {
        // 2014-W01 starts 2013-12-30
        assert_eq!(iso_week_start(2014), days_from_civil(2013, 12, 30));
        // 2015-W01 starts 2014-12-29
        assert_eq!(iso_week_start(2015), days_from_civil(2014, 12, 29));
        // 0001-W01 starts on 0001-01-01
        assert_eq!(iso_week_start(1), days_from_civil(1, 1, 1));
    }

    #[test]
    fn test_weeks_in_year_cases() {
        struct TestCase {
            year:        i64,
            weeks:       u8,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2014,
                weeks:       52,
                description: "Jan 1 is a Wednesday in a common year",
            },
            TestCase {
                year:        2015,
                weeks:       53,
                description: "Jan 1 is a Thursday",
            },
            TestCase {
                year:        2020,
                weeks:       53,
                description: "leap year starting on Wednesday",
            },
            TestCase {
                year:        2021,
                weeks:       52,
                description: "Jan 1 is a Friday",
            },
            TestCase {
                year:        2026,
                weeks:       53,
                description: "Jan 1 is a Thursday",
            },
        ];

        for case in &cases {
            assert_eq!(weeks_in_year(case.year), case.weeks, "{} ({})", case.year, case.description);
        }
    }

    #[test]
    fn test_iso_week_from_days() {
        // 2014-07-16 (Wednesday) is in 2014-W29
        assert_eq!(iso_week_from_days(days_from_civil(2014, 7, 16)), (2014, 29));
        // 2014-12-29 belongs to 2015-W01
        assert_eq!(iso_week_from_days(days_from_civil(2014, 12, 29)), (2015, 1));
        // 2016-01-03 (Sunday) belongs to 2015-W53
        assert_eq!(iso_week_from_days(days_from_civil(2016, 1, 3)), (2015, 53));
    }
}
