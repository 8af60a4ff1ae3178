use crate::calendar::weeks_in_year;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_WEEK, MIN_YEAR, WEEKS_IN_LONG_YEAR,
};
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=275760)
/// Uses `NonZeroU32` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Year(NonZeroU32);

impl Year {
    /// Year 1, the earliest representable year
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u32) -> Result<Self, ParseError> {
        let non_zero = NonZeroU32::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Creates a Year from a signed calendar computation, if it is in range
    pub(crate) fn from_i64(value: i64) -> Option<Self> {
        u32::try_from(value).ok().and_then(|v| Self::new(v).ok())
    }

    /// Like [`Year::from_i64`], but pins out-of-range values to the nearest bound
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn saturating(value: i64) -> Self {
        let clamped = value.clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR)) as u32;
        NonZeroU32::new(clamped).map_or(Self::MIN, Self)
    }

    /// Returns the year value as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for Year {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u32 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// January
    pub const JANUARY: Self = Self(NonZeroU8::MIN);

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Wraps a month produced by civil-date arithmetic, which is always in range
    pub(crate) fn from_civil(value: u8) -> Self {
        NonZeroU8::new(value).map_or(Self::JANUARY, Self)
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// The first day of any month
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u32, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Wraps a day produced by civil-date arithmetic, which is always in range
    pub(crate) fn from_civil(value: u8) -> Self {
        NonZeroU8::new(value).map_or(Self::FIRST, Self)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against a month without year/month context, so only the
        // bounds shared by every month are checked
        if value < MIN_DAY || value > DAYS_IN_MONTH[1] {
            return Err(ParseError::InvalidDay {
                month: 0,
                day: value,
                year: 0,
            });
        }
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidDay {
            month: 0,
            day: value,
            year: 0,
        })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ISO week number guaranteed to exist in its week-year
/// (1..=52, or 1..=53 in long years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Week(NonZeroU8);

impl Week {
    /// ISO week 1
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// Creates a new Week, validating it against the number of ISO weeks in `year`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidWeek` if the value is 0 or past the last week of `year`.
    pub fn new(value: u8, year: u32) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidWeek { week: value, year };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > weeks_in_year(i64::from(year)) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the week number as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Week {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Context-free: only bounds that hold for every week-year
        if !(MIN_WEEK..=WEEKS_IN_LONG_YEAR).contains(&value) {
            return Err(ParseError::InvalidWeek { week: value, year: 0 });
        }
        let non_zero =
            NonZeroU8::new(value).ok_or(ParseError::InvalidWeek { week: value, year: 0 })?;
        Ok(Self(non_zero))
    }
}

impl From<Week> for u8 {
    fn from(week: Week) -> Self {
        week.0.get()
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

pub const fn is_leap_year(year: u32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
