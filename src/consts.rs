/// Minimum valid year (inclusive); `0000` is rejected
pub const MIN_YEAR: u32 = 1;

/// Maximum valid year (inclusive), the last year an ECMAScript time value reaches
pub const MAX_YEAR: u32 = 275_760;

/// Minimum number of digits in a serialized year
pub const MIN_YEAR_DIGITS: usize = 4;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days per month in a common year, indexed by month number; slot 0 is padding
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// First ISO week of a week-year
pub const MIN_WEEK: u8 = 1;
/// Weeks in a regular ISO week-year
pub const WEEKS_IN_SHORT_YEAR: u8 = 52;
/// Weeks in a long ISO week-year
pub const WEEKS_IN_LONG_YEAR: u8 = 53;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u32 = 400;

/// Days in a week
pub const DAYS_PER_WEEK: i64 = 7;
/// Months in a year
pub const MONTHS_PER_YEAR: i64 = 12;
/// Milliseconds in a UTC day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Year that month numbers are counted from (`1970-01` is month 0)
pub const EPOCH_YEAR: i64 = 1970;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Marks the week component of a week string (`2014-W28`)
pub const WEEK_DESIGNATOR: char = 'W';

/// Keyword that disables stepping
pub const STEP_ANY: &str = "any";
