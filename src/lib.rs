mod calendar;
mod constraints;
mod consts;
mod control;
mod convert;
mod prelude;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use constraints::{Constraints, StepError, StepSpec, ValidityFlag, ValidityResult};
pub use control::{ControlAttributes, InputControl};
pub use types::{Day, Month, Week, Year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// The `type` of a date-like input control, which fixes the granularity of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// `<input type="date">`, stepped in days
    #[display(fmt = "date")]
    Date,
    /// `<input type="month">`, stepped in months
    #[display(fmt = "month")]
    Month,
    /// `<input type="week">`, stepped in ISO weeks
    #[display(fmt = "week")]
    Week,
}

impl FromStr for InputKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // the HTML `type` attribute is ASCII case-insensitive
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            _ => Err(ParseError::UnknownKind(s.to_owned())),
        }
    }
}

/// The value of a date, month or week input.
///
/// Every field is validated on construction, so a `TemporalValue` always names a
/// day, month or ISO week that exists in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TemporalValue {
    /// Calendar date, `YYYY-MM-DD`
    #[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
    Date {
        year:  types::Year,
        month: types::Month,
        day:   types::Day,
    },
    /// Month of a year, `YYYY-MM`
    #[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
    Month {
        year:  types::Year,
        month: types::Month,
    },
    /// ISO week of a week-year, `YYYY-Www`
    #[display(fmt = "{:04}-W{:02}", "year.get()", "week.get()")]
    Week { year: types::Year, week: types::Week },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u32 },
    #[display(fmt = "Invalid week {week} for week-year {year}")]
    InvalidWeek { week: u8, year: u32 },
    #[display(fmt = "Expected a {expected} value, found a {found} value")]
    KindMismatch { expected: InputKind, found: InputKind },
    #[display(fmt = "Unknown input type: {_0}")]
    UnknownKind(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl TemporalValue {
    /// Creates a date value from raw components
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_ymd(year: u32, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self::Date {
            year:  types::Year::new(year)?,
            month: types::Month::new(month)?,
            day:   types::Day::new(day, year, month)?,
        })
    }

    /// Creates a month value from raw components
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_ym(year: u32, month: u8) -> Result<Self, ParseError> {
        Ok(Self::Month {
            year:  types::Year::new(year)?,
            month: types::Month::new(month)?,
        })
    }

    /// Creates a week value from raw components
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_yw(year: u32, week: u8) -> Result<Self, ParseError> {
        Ok(Self::Week {
            year: types::Year::new(year)?,
            week: types::Week::new(week, year)?,
        })
    }

    /// Parses `raw` as the canonical form of `kind`, sanitizing any failure to `None`.
    ///
    /// This is how a control treats its `value`, `min` and `max` attributes: there is
    /// no distinction between a malformed string and a well-formed but impossible one.
    pub fn parse(raw: &str, kind: InputKind) -> Option<Self> {
        Self::parse_as(raw, kind).ok()
    }

    /// Parses `raw` as the canonical form of `kind`, reporting why it was rejected.
    ///
    /// # Errors
    /// Returns `ParseError::KindMismatch` for a well-formed value of another kind, or
    /// the error from [`FromStr`].
    pub fn parse_as(raw: &str, kind: InputKind) -> Result<Self, ParseError> {
        let value = raw.parse::<Self>()?;
        if value.kind() == kind {
            Ok(value)
        } else {
            Err(ParseError::KindMismatch {
                expected: kind,
                found:    value.kind(),
            })
        }
    }

    /// Returns which kind of control this value belongs to
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Date { .. } => InputKind::Date,
            Self::Month { .. } => InputKind::Month,
            Self::Week { .. } => InputKind::Week,
        }
    }

    /// Returns the year (the ISO week-year for weeks)
    pub const fn year(&self) -> u32 {
        match self {
            Self::Date { year, .. } | Self::Month { year, .. } | Self::Week { year, .. } => {
                year.get()
            }
        }
    }

    /// Returns the month component if present
    pub const fn month(&self) -> Option<u8> {
        match self {
            Self::Date { month, .. } | Self::Month { month, .. } => Some(month.get()),
            Self::Week { .. } => None,
        }
    }

    /// Returns the day component if present
    pub const fn day(&self) -> Option<u8> {
        match self {
            Self::Date { day, .. } => Some(day.get()),
            Self::Month { .. } | Self::Week { .. } => None,
        }
    }

    /// Returns the week component if present
    pub const fn week(&self) -> Option<u8> {
        match self {
            Self::Week { week, .. } => Some(week.get()),
            Self::Date { .. } | Self::Month { .. } => None,
        }
    }

    /// Lexicographic key within a kind: `(year, month, day)`, `(year, month)` or `(year, week)`
    #[inline]
    const fn sort_key(&self) -> (u32, u8, u8) {
        match *self {
            Self::Date { year, month, day } => (year.get(), month.get(), day.get()),
            Self::Month { year, month } => (year.get(), month.get(), 0),
            Self::Week { year, week } => (year.get(), week.get(), 0),
        }
    }
}

impl FromStr for TemporalValue {
    type Err = ParseError;

    /// Parses any canonical form, inferring the kind from its shape.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        match parts.as_slice() {
            [year, rest] => match rest.strip_prefix(WEEK_DESIGNATOR) {
                Some(week) => Self::parse_week(year, week),
                None => Self::parse_month(year, rest),
            },
            [year, month, day] => Self::parse_date(year, month, day),
            _ => Err(ParseError::InvalidFormat(s.to_owned())),
        }
    }
}

impl TemporalValue {
    /// Parses a year of at least four digits. Longer years may not carry a
    /// leading zero, which keeps every accepted string canonical.
    fn parse_year(s: &str) -> Result<u32, ParseError> {
        let digits_only = s.bytes().all(|b| b.is_ascii_digit());
        if !digits_only || s.len() < MIN_YEAR_DIGITS {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        if s.len() > MIN_YEAR_DIGITS && s.starts_with('0') {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        // all digits, so the only failure left is overflow
        s.parse::<u32>().map_err(|_| ParseError::InvalidYear(u32::MAX))
    }

    /// Parses a component that must be exactly two digits
    fn parse_two_digits(s: &str) -> Result<u8, ParseError> {
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_date(year: &str, month: &str, day: &str) -> Result<Self, ParseError> {
        let year_u32 = Self::parse_year(year)?;
        let month_u8 = Self::parse_two_digits(month)?;
        let day_u8 = Self::parse_two_digits(day)?;
        Self::from_ymd(year_u32, month_u8, day_u8)
    }

    fn parse_month(year: &str, month: &str) -> Result<Self, ParseError> {
        let year_u32 = Self::parse_year(year)?;
        let month_u8 = Self::parse_two_digits(month)?;
        Self::from_ym(year_u32, month_u8)
    }

    fn parse_week(year: &str, week: &str) -> Result<Self, ParseError> {
        let year_u32 = Self::parse_year(year)?;
        let week_u8 = Self::parse_two_digits(week)?;
        Self::from_yw(year_u32, week_u8)
    }
}

/// Values of the same kind are ordered chronologically; values of different
/// kinds are unordered.
impl PartialOrd for TemporalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind() == other.kind() {
            Some(self.sort_key().cmp(&other.sort_key()))
        } else {
            None
        }
    }
}

impl Serialize for TemporalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TemporalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
