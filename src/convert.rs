//! Numeric and calendar-date conversions, and the unit arithmetic used for stepping.
//!
//! Each kind has a unit: days for dates, months for months, weeks for weeks.
//! `unit_index` numbers every value of a kind consecutively in its unit, so
//! stepping and step alignment never mix units.

use crate::calendar::{civil_from_days, days_from_civil, iso_week_from_days, iso_week_start};
use crate::consts::{
    DAYS_PER_WEEK, EPOCH_YEAR, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTHS_PER_YEAR,
    MS_PER_DAY,
};
use crate::types::{Day, Month, Week, Year};
use crate::{InputKind, TemporalValue};

/// Epoch day of 0001-01-01
const MIN_EPOCH_DAY: i64 = days_from_civil(MIN_YEAR as i64, JANUARY, MIN_DAY);
/// Epoch day of the last representable date
const MAX_EPOCH_DAY: i64 = days_from_civil(MAX_YEAR as i64, MAX_MONTH, 31);
/// Month index of 0001-01
const MIN_MONTH_INDEX: i64 = (MIN_YEAR as i64 - EPOCH_YEAR) * MONTHS_PER_YEAR;
/// Month index of the last representable month
const MAX_MONTH_INDEX: i64 = (MAX_YEAR as i64 - EPOCH_YEAR) * MONTHS_PER_YEAR + MONTHS_PER_YEAR - 1;
/// Shifts epoch days so that every Monday is a multiple of seven
const MONDAY_ALIGNMENT: i64 = 3;

impl TemporalValue {
    /// The value a control of `kind` measures steps from when nothing else is configured:
    /// `0001-01-01`, `0001-01` or `0001-W01`.
    pub const fn zero_point(kind: InputKind) -> Self {
        match kind {
            InputKind::Date => Self::Date {
                year:  Year::MIN,
                month: Month::JANUARY,
                day:   Day::FIRST,
            },
            InputKind::Month => Self::Month {
                year:  Year::MIN,
                month: Month::JANUARY,
            },
            InputKind::Week => Self::Week {
                year: Year::MIN,
                week: Week::FIRST,
            },
        }
    }

    /// Days since the epoch of the calendar date this value maps to:
    /// the date itself, the 1st of the month, or the Monday of the week.
    pub(crate) fn calendar_days(&self) -> i64 {
        match *self {
            Self::Date { year, month, day } => {
                days_from_civil(i64::from(year.get()), month.get(), day.get())
            }
            Self::Month { year, month } => {
                days_from_civil(i64::from(year.get()), month.get(), MIN_DAY)
            }
            Self::Week { year, week } => {
                iso_week_start(i64::from(year.get())) + (i64::from(week.get()) - 1) * DAYS_PER_WEEK
            }
        }
    }

    /// Position of this value in its kind's unit sequence (days, months or weeks).
    pub(crate) fn unit_index(&self) -> i64 {
        match *self {
            Self::Date { .. } => self.calendar_days(),
            Self::Month { year, month } => {
                (i64::from(year.get()) - EPOCH_YEAR) * MONTHS_PER_YEAR + i64::from(month.get()) - 1
            }
            Self::Week { .. } => (self.calendar_days() + MONDAY_ALIGNMENT).div_euclid(DAYS_PER_WEEK),
        }
    }

    /// Inverse of [`TemporalValue::unit_index`]; `None` outside the representable range.
    pub(crate) fn from_unit_index(kind: InputKind, index: i64) -> Option<Self> {
        match kind {
            InputKind::Date => Self::from_epoch_days(index, kind),
            InputKind::Month => {
                if !(MIN_MONTH_INDEX..=MAX_MONTH_INDEX).contains(&index) {
                    return None;
                }
                let year = Year::from_i64(EPOCH_YEAR + index.div_euclid(MONTHS_PER_YEAR))?;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let month = Month::new(index.rem_euclid(MONTHS_PER_YEAR) as u8 + 1).ok()?;
                Some(Self::Month { year, month })
            }
            InputKind::Week => {
                let monday = index.checked_mul(DAYS_PER_WEEK)?.checked_sub(MONDAY_ALIGNMENT)?;
                Self::from_epoch_days(monday, kind)
            }
        }
    }

    /// The value of `kind` containing the given epoch day.
    fn from_epoch_days(days: i64, kind: InputKind) -> Option<Self> {
        if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&days) {
            return None;
        }
        match kind {
            InputKind::Date => {
                let (y, m, d) = civil_from_days(days);
                let year = Year::from_i64(y)?;
                Some(Self::Date {
                    year,
                    month: Month::new(m).ok()?,
                    day: Day::new(d, year.get(), m).ok()?,
                })
            }
            InputKind::Month => {
                let (y, m, _) = civil_from_days(days);
                Some(Self::Month {
                    year:  Year::from_i64(y)?,
                    month: Month::new(m).ok()?,
                })
            }
            InputKind::Week => {
                // the ISO week-year of the last days of MAX_YEAR can fall past it
                let (y, w) = iso_week_from_days(days);
                let year = Year::from_i64(y)?;
                Some(Self::Week {
                    year,
                    week: Week::new(w, year.get()).ok()?,
                })
            }
        }
    }

    /// Signed count of units from `base` to `self`, or `None` when the kinds differ.
    pub fn units_between(&self, base: &Self) -> Option<i64> {
        (self.kind() == base.kind()).then(|| self.unit_index() - base.unit_index())
    }

    /// Moves `units` days, months or weeks; `None` if the result is unrepresentable.
    pub fn shift(&self, units: i64) -> Option<Self> {
        let index = self.unit_index().checked_add(units)?;
        Self::from_unit_index(self.kind(), index)
    }

    /// The numeric value a control reports (`valueAsNumber`).
    ///
    /// Dates and weeks are milliseconds since the epoch at UTC midnight of the date
    /// or of the week's Monday. Months are the count of whole months since 1970-01
    /// (`2014-07` is 534), matching the browser contract rather than a timestamp.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_numeric(&self) -> f64 {
        match self {
            Self::Date { .. } | Self::Week { .. } => (self.calendar_days() * MS_PER_DAY) as f64,
            Self::Month { .. } => self.unit_index() as f64,
        }
    }

    /// Inverse of [`TemporalValue::to_numeric`].
    ///
    /// Timestamps are floored to the containing UTC day, and for weeks normalized to
    /// that week's Monday. Month counts are floored to whole months. Non-finite or
    /// out-of-range input gives `None`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_numeric(n: f64, kind: InputKind) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }
        match kind {
            InputKind::Month => {
                let index = n.floor();
                if index < MIN_MONTH_INDEX as f64 || index > MAX_MONTH_INDEX as f64 {
                    return None;
                }
                Self::from_unit_index(kind, index as i64)
            }
            InputKind::Date | InputKind::Week => {
                let days = (n / MS_PER_DAY as f64).floor();
                if days < MIN_EPOCH_DAY as f64 || days > MAX_EPOCH_DAY as f64 {
                    return None;
                }
                Self::from_epoch_days(days as i64, kind)
            }
        }
    }

    /// The calendar date this value stands for: itself for dates, the 1st for
    /// months, the Monday for weeks.
    pub fn to_calendar_date(&self) -> Self {
        match *self {
            Self::Date { .. } => *self,
            Self::Month { year, month } => Self::Date {
                year,
                month,
                day: Day::FIRST,
            },
            Self::Week { .. } => {
                let (y, m, d) = civil_from_days(self.calendar_days());
                Self::Date {
                    year:  Year::saturating(y),
                    month: Month::from_civil(m),
                    day:   Day::from_civil(d),
                }
            }
        }
    }

    /// The value of `kind` containing the calendar date of `date`: the date itself,
    /// the month it falls in, or the ISO week it falls in.
    pub fn from_calendar_date(date: &Self, kind: InputKind) -> Option<Self> {
        Self::from_epoch_days(date.calendar_days(), kind)
    }

    /// Milliseconds since the epoch of [`TemporalValue::to_calendar_date`] (`valueAsDate`).
    ///
    /// Unlike [`TemporalValue::to_numeric`] this is a timestamp for months as well.
    #[allow(clippy::cast_precision_loss)]
    pub fn calendar_millis(&self) -> f64 {
        (self.calendar_days() * MS_PER_DAY) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month, week};
    use proptest::prelude::*;

    #[test]
    fn test_date_to_numeric() {
        assert_eq!(date(2014, 7, 8).to_numeric(), 1_404_777_600_000.0);
        assert_eq!(date(1970, 1, 1).to_numeric(), 0.0);
        assert_eq!(date(1969, 12, 31).to_numeric(), -86_400_000.0);
    }

    #[test]
    fn test_month_to_numeric_counts_months() {
        assert_eq!(month(2014, 7).to_numeric(), 534.0);
        assert_eq!(month(1970, 1).to_numeric(), 0.0);
        assert_eq!(month(1969, 12).to_numeric(), -1.0);
    }

    #[test]
    fn test_week_to_numeric_is_monday() {
        assert_eq!(week(2014, 28).to_numeric(), 1_404_691_200_000.0);
        assert_eq!(week(2014, 29).to_numeric(), 1_405_296_000_000.0);
    }

    #[test]
    fn test_from_numeric_date_floors_to_midnight() {
        let value = TemporalValue::from_numeric(1_404_889_200_000.0, InputKind::Date).unwrap();
        assert_eq!(value, date(2014, 7, 9));
        assert_eq!(value.to_numeric(), 1_404_864_000_000.0);

        // before the epoch floors toward the earlier day
        let value = TemporalValue::from_numeric(-1.0, InputKind::Date).unwrap();
        assert_eq!(value, date(1969, 12, 31));
    }

    #[test]
    fn test_from_numeric_week_normalizes_to_monday() {
        let value = TemporalValue::from_numeric(1_405_468_800_000.0, InputKind::Week).unwrap();
        assert_eq!(value, week(2014, 29));
        assert_eq!(value.to_numeric(), 1_405_296_000_000.0);
    }

    #[test]
    fn test_from_numeric_month() {
        assert_eq!(TemporalValue::from_numeric(535.0, InputKind::Month), Some(month(2014, 8)));
        assert_eq!(TemporalValue::from_numeric(535.9, InputKind::Month), Some(month(2014, 8)));
        assert_eq!(TemporalValue::from_numeric(-1.0, InputKind::Month), Some(month(1969, 12)));
    }

    #[test]
    fn test_from_numeric_rejects_unrepresentable() {
        for kind in [InputKind::Date, InputKind::Month, InputKind::Week] {
            assert_eq!(TemporalValue::from_numeric(f64::NAN, kind), None);
            assert_eq!(TemporalValue::from_numeric(f64::INFINITY, kind), None);
            assert_eq!(TemporalValue::from_numeric(-1e300, kind), None);
            assert_eq!(TemporalValue::from_numeric(1e300, kind), None);
        }
        // the day before 0001-01-01
        let before_min = date(1, 1, 1).to_numeric() - 1.0;
        assert_eq!(TemporalValue::from_numeric(before_min, InputKind::Date), None);
    }

    #[test]
    fn test_to_calendar_date() {
        assert_eq!(date(2014, 7, 8).to_calendar_date(), date(2014, 7, 8));
        assert_eq!(month(2014, 7).to_calendar_date(), date(2014, 7, 1));
        assert_eq!(week(2014, 28).to_calendar_date(), date(2014, 7, 7));
        // 2015-W01 starts in the previous calendar year
        assert_eq!(week(2015, 1).to_calendar_date(), date(2014, 12, 29));
    }

    #[test]
    fn test_calendar_millis() {
        assert_eq!(month(2014, 7).calendar_millis(), 1_404_172_800_000.0);
        assert_eq!(week(2014, 28).calendar_millis(), 1_404_691_200_000.0);
        assert_eq!(date(2014, 7, 8).calendar_millis(), date(2014, 7, 8).to_numeric());
    }

    #[test]
    fn test_from_calendar_date() {
        let first_of_september = date(2014, 9, 1);
        assert_eq!(
            TemporalValue::from_calendar_date(&first_of_september, InputKind::Month),
            Some(month(2014, 9))
        );
        assert_eq!(
            TemporalValue::from_calendar_date(&date(2014, 7, 21), InputKind::Week),
            Some(week(2014, 30))
        );
        assert_eq!(
            TemporalValue::from_calendar_date(&date(2014, 7, 10), InputKind::Date),
            Some(date(2014, 7, 10))
        );
        // a week-year past the last representable year
        assert_eq!(
            TemporalValue::from_calendar_date(&date(275_760, 12, 31), InputKind::Week),
            None
        );
    }

    #[test]
    fn test_zero_points() {
        assert_eq!(TemporalValue::zero_point(InputKind::Date), date(1, 1, 1));
        assert_eq!(TemporalValue::zero_point(InputKind::Month), month(1, 1));
        assert_eq!(TemporalValue::zero_point(InputKind::Week), week(1, 1));
        assert_eq!(week(1, 1).to_calendar_date(), date(1, 1, 1));
    }

    #[test]
    fn test_units_between() {
        assert_eq!(date(2014, 7, 15).units_between(&date(2014, 7, 8)), Some(7));
        assert_eq!(date(2014, 7, 8).units_between(&date(2014, 7, 15)), Some(-7));
        assert_eq!(month(2015, 1).units_between(&month(2014, 7)), Some(6));
        assert_eq!(week(2015, 1).units_between(&week(2014, 52)), Some(1));
        assert_eq!(week(2016, 1).units_between(&week(2015, 52)), Some(2));
        assert_eq!(date(2014, 7, 1).units_between(&month(2014, 7)), None);
    }

    #[test]
    fn test_shift() {
        assert_eq!(date(2014, 7, 8).shift(7), Some(date(2014, 7, 15)));
        assert_eq!(date(2014, 2, 28).shift(1), Some(date(2014, 3, 1)));
        assert_eq!(date(2012, 2, 28).shift(1), Some(date(2012, 2, 29)));
        assert_eq!(month(2014, 7).shift(6), Some(month(2015, 1)));
        assert_eq!(month(2014, 1).shift(-1), Some(month(2013, 12)));
        assert_eq!(week(2014, 52).shift(1), Some(week(2015, 1)));
        assert_eq!(week(2015, 52).shift(1), Some(week(2015, 53)));
        assert_eq!(week(2014, 28).shift(6), Some(week(2014, 34)));
    }

    #[test]
    fn test_shift_out_of_range() {
        assert_eq!(date(1, 1, 1).shift(-1), None);
        assert_eq!(month(1, 1).shift(-1), None);
        assert_eq!(week(1, 1).shift(-1), None);
        assert_eq!(month(275_760, 12).shift(1), None);
        assert_eq!(date(2014, 7, 8).shift(i64::MAX), None);
        assert_eq!(week(2014, 7).shift(i64::MIN), None);
    }

    proptest! {
        #[test]
        fn prop_numeric_round_trip(days in MIN_EPOCH_DAY..=days_from_civil(9999, 12, 31)) {
            let value = TemporalValue::from_epoch_days(days, InputKind::Date).unwrap();
            prop_assert_eq!(TemporalValue::from_numeric(value.to_numeric(), InputKind::Date), Some(value));

            let week = TemporalValue::from_epoch_days(days, InputKind::Week).unwrap();
            prop_assert_eq!(TemporalValue::from_numeric(week.to_numeric(), InputKind::Week), Some(week));
        }

        #[test]
        fn prop_shift_is_invertible(days in MIN_EPOCH_DAY..=days_from_civil(9999, 12, 31), units in -5000i64..5000) {
            let value = TemporalValue::from_epoch_days(days, InputKind::Date).unwrap();
            if let Some(moved) = value.shift(units) {
                prop_assert_eq!(moved.shift(-units), Some(value));
                prop_assert_eq!(moved.units_between(&value), Some(units));
            }
        }
    }
}
