//! Card expiry date validation.
//!
//! The form's input mask produces expiry dates as `MM/YY`. A date is valid
//! when its month has not yet elapsed relative to the current UTC month; a
//! card is usable through the last day of the month printed on it, so there
//! is no day-of-month check.
//!
//! Years are compared as two-digit values (the current year is truncated to
//! its last two digits), so comparisons across a century boundary are not
//! meaningful: on January 2100, `12/99` is still considered valid.
//!
//! Month values are not range-checked here. The input mask only produces
//! 01-12; anything else simply flows through the comparison.
//!
//! # Example
//!
//! ```
//! use payform::expiry::{is_expiry_valid_at, YearMonth};
//!
//! let now = YearMonth::new(2020, 1).unwrap();
//! assert!(is_expiry_valid_at("01/20", now));
//! assert!(!is_expiry_valid_at("12/19", now));
//! assert!(!is_expiry_valid_at("0120", now));
//! ```

use chrono::{Datelike, Utc};
use std::fmt;

/// Separator between month and year.
pub const EXPIRY_SEPARATOR: char = '/';

/// A calendar month, used as the reference "now" for expiry checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a reference month. Returns `None` unless `month` is 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Reads the current UTC year and month from the system clock.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Returns the full year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the last two digits of the year.
    #[inline]
    pub fn short_year(&self) -> u32 {
        self.year.rem_euclid(100) as u32
    }
}

/// A parsed `MM/YY` expiry date.
///
/// Both fields are stored exactly as typed (0-99); see the module docs for
/// why the month is not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    month: u8,
    year: u8,
}

impl ExpiryDate {
    /// Returns the month as typed.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the two-digit year as typed.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Returns the year interpreted as `2000 + YY`.
    #[inline]
    pub const fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }

    /// Returns true if the expiry month is strictly before `now`.
    pub fn is_elapsed_at(&self, now: YearMonth) -> bool {
        let year = self.year as u32;
        let month = self.month as u32;
        let current_year = now.short_year();

        if year < current_year {
            return true;
        }
        year == current_year && month < now.month()
    }

    /// Returns true if the expiry month is strictly before the current UTC month.
    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.is_elapsed_at(YearMonth::now())
    }

    /// Zero-padded month, as sent to the tokenization call.
    pub fn month_str(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Zero-padded two-digit year, as sent to the tokenization call.
    pub fn year_str(&self) -> String {
        format!("{:02}", self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// Errors that can occur during expiry date parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    /// The input string is empty.
    #[error("expiry date is empty")]
    Empty,
    /// No `/` between month and year.
    #[error("expiry date must be written as MM/YY")]
    MissingSeparator,
    /// The month part is not one or two digits.
    #[error("invalid expiry month '{0}'")]
    InvalidMonth(String),
    /// The year part is not one or two digits.
    #[error("invalid expiry year '{0}'")]
    InvalidYear(String),
    /// The expiry month has already elapsed.
    #[error("card expired ({month:02}/{year:02})")]
    Expired {
        /// The expiry month.
        month: u8,
        /// The two-digit expiry year.
        year: u8,
    },
}

/// Parses an `MM/YY` string without checking it against the clock.
///
/// The input is split at the first `/`; each side must be one or two ASCII
/// digits.
///
/// # Example
///
/// ```
/// use payform::expiry::parse_expiry;
///
/// let expiry = parse_expiry("07/31").unwrap();
/// assert_eq!(expiry.month(), 7);
/// assert_eq!(expiry.full_year(), 2031);
/// assert!(parse_expiry("0731").is_err());
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    let (month_str, year_str) = input
        .split_once(EXPIRY_SEPARATOR)
        .ok_or(ExpiryError::MissingSeparator)?;

    let month = parse_two_digits(month_str)
        .ok_or_else(|| ExpiryError::InvalidMonth(month_str.to_string()))?;
    let year = parse_two_digits(year_str)
        .ok_or_else(|| ExpiryError::InvalidYear(year_str.to_string()))?;

    Ok(ExpiryDate { month, year })
}

/// Parses one or two ASCII digits.
fn parse_two_digits(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Returns true if the input is exactly `MM/YY`: two digits, `/`, two digits.
///
/// This is the shape the input mask produces; the form uses it to tell an
/// incomplete expiry apart from an elapsed one.
pub fn is_well_formed(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == EXPIRY_SEPARATOR as u8
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

/// Parses an expiry date and rejects it if elapsed relative to `now`.
pub fn validate_expiry_at(input: &str, now: YearMonth) -> Result<ExpiryDate, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_elapsed_at(now) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    Ok(expiry)
}

/// Parses an expiry date and rejects it if elapsed relative to the clock.
#[inline]
pub fn validate_expiry(input: &str) -> Result<ExpiryDate, ExpiryError> {
    validate_expiry_at(input, YearMonth::now())
}

/// Returns true if `input` is an `MM/YY` date whose month has not elapsed.
///
/// Reads the system clock on every call. Malformed input returns `false`;
/// this never panics.
///
/// # Example
///
/// ```
/// use payform::is_expiry_valid;
///
/// assert!(is_expiry_valid("12/99"));
/// assert!(!is_expiry_valid("01/20"));
/// assert!(!is_expiry_valid("garbage"));
/// ```
#[inline]
pub fn is_expiry_valid(input: &str) -> bool {
    is_expiry_valid_at(input, YearMonth::now())
}

/// Like [`is_expiry_valid`], against a fixed reference month.
#[inline]
pub fn is_expiry_valid_at(input: &str, now: YearMonth) -> bool {
    validate_expiry_at(input, now).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_elapsed_month_rejected() {
        assert!(!is_expiry_valid_at("01/20", ym(2020, 2)));
    }

    #[test]
    fn test_current_month_still_valid() {
        assert!(is_expiry_valid_at("01/20", ym(2020, 1)));
    }

    #[test]
    fn test_future_month_valid() {
        assert!(is_expiry_valid_at("01/20", ym(2019, 12)));
        assert!(is_expiry_valid_at("12/20", ym(2020, 6)));
        assert!(is_expiry_valid_at("01/21", ym(2020, 12)));
    }

    #[test]
    fn test_elapsed_year_rejected() {
        assert!(!is_expiry_valid_at("12/19", ym(2020, 1)));
        assert!(!is_expiry_valid_at("12/25", ym(2026, 10)));
    }

    #[test]
    fn test_month_13_follows_comparison() {
        // 13 is never below a real current month
        assert!(is_expiry_valid_at("13/99", ym(2026, 10)));
        assert!(is_expiry_valid_at("13/26", ym(2026, 12)));
        assert!(!is_expiry_valid_at("13/25", ym(2026, 1)));
    }

    #[test]
    fn test_month_zero_follows_comparison() {
        assert!(!is_expiry_valid_at("00/26", ym(2026, 1)));
        assert!(is_expiry_valid_at("00/27", ym(2026, 1)));
    }

    #[test]
    fn test_century_rollover_is_literal() {
        // 99 > 00, so the two-digit comparison calls this valid
        assert!(is_expiry_valid_at("12/99", ym(2100, 1)));
        assert!(!is_expiry_valid_at("01/00", ym(2099, 1)));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(parse_expiry("0120"), Err(ExpiryError::MissingSeparator));
        assert!(!is_expiry_valid_at("0120", ym(2000, 1)));
    }

    #[test]
    fn test_unparseable_parts() {
        assert_eq!(
            parse_expiry("ab/20"),
            Err(ExpiryError::InvalidMonth("ab".to_string()))
        );
        assert_eq!(
            parse_expiry("01/"),
            Err(ExpiryError::InvalidYear(String::new()))
        );
        assert_eq!(
            parse_expiry("01/2030"),
            Err(ExpiryError::InvalidYear("2030".to_string()))
        );
        assert_eq!(
            parse_expiry("/30"),
            Err(ExpiryError::InvalidMonth(String::new()))
        );
        assert!(parse_expiry("01/20/30").is_err());
        assert!(parse_expiry("+1/30").is_err());
        assert!(parse_expiry(" 1/30").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_expiry(""), Err(ExpiryError::Empty));
        assert!(!is_expiry_valid(""));
    }

    #[test]
    fn test_single_digit_parts() {
        let expiry = parse_expiry("1/9").unwrap();
        assert_eq!(expiry.month(), 1);
        assert_eq!(expiry.year(), 9);
        assert_eq!(expiry.to_string(), "01/09");
    }

    #[test]
    fn test_validate_reports_expired() {
        assert_eq!(
            validate_expiry_at("03/21", ym(2021, 4)),
            Err(ExpiryError::Expired { month: 3, year: 21 })
        );
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("01/20"));
        assert!(is_well_formed("13/99"));
        assert!(!is_well_formed("1/20"));
        assert!(!is_well_formed("01/2020"));
        assert!(!is_well_formed("01-20"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_year_month_new() {
        assert!(YearMonth::new(2020, 1).is_some());
        assert!(YearMonth::new(2020, 12).is_some());
        assert!(YearMonth::new(2020, 0).is_none());
        assert!(YearMonth::new(2020, 13).is_none());
        assert_eq!(ym(2026, 10).short_year(), 26);
    }

    #[test]
    fn test_clock_is_read_per_call() {
        let now = YearMonth::now();
        assert!((1..=12).contains(&now.month()));
        assert!(now.year() >= 2024);
    }

    #[test]
    fn test_token_parts() {
        let expiry = parse_expiry("7/31").unwrap();
        assert_eq!(expiry.month_str(), "07");
        assert_eq!(expiry.year_str(), "31");
        assert_eq!(expiry.full_year(), 2031);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ExpiryError::Expired { month: 1, year: 20 }.to_string(),
            "card expired (01/20)"
        );
        assert_eq!(
            ExpiryError::MissingSeparator.to_string(),
            "expiry date must be written as MM/YY"
        );
    }
}
