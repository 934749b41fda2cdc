//! Month-granular calendar arithmetic.
//!
//! The simulation steps one calendar month at a time, so every date in the
//! input is a `YYYY-MM` month. `MonthStamp` keeps the year and month as plain
//! integers and does offset arithmetic directly, without going through
//! `jiff::Span`. Conversions to and from `jiff::civil::Date` are provided for
//! callers that hold full dates.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MonthStampError;

/// A calendar month, serialized as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthStamp {
    year: i16,
    month: i8,
}

impl MonthStamp {
    pub fn new(year: i16, month: i8) -> Result<Self, MonthStampError> {
        if !(1..=9999).contains(&year) {
            return Err(MonthStampError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(MonthStampError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of this month.
    pub fn first_day(self) -> Date {
        jiff::civil::date(self.year, self.month, 1)
    }

    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    #[inline]
    pub fn is_january(self) -> bool {
        self.month == 1
    }

    /// Signed number of months from `origin` to `self`.
    ///
    /// Positive when `self` is later than `origin`.
    #[inline]
    pub fn months_since(self, origin: MonthStamp) -> i32 {
        (self.year as i32 - origin.year as i32) * 12 + (self.month as i32 - origin.month as i32)
    }

    /// Shift by `n` months (negative moves backwards).
    #[inline]
    pub fn add_months(self, n: i32) -> Self {
        let ordinal = self.year as i32 * 12 + (self.month as i32 - 1) + n;
        Self {
            year: ordinal.div_euclid(12) as i16,
            month: (ordinal.rem_euclid(12) + 1) as i8,
        }
    }
}

impl fmt::Display for MonthStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthStamp {
    type Err = MonthStampError;

    /// Accepts `YYYY-MM`, or a full `YYYY-MM-DD` date truncated to its month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == 10 {
            return s
                .parse::<Date>()
                .map(Self::from_date)
                .map_err(|_| MonthStampError::Malformed(s.to_string()));
        }

        let malformed = || MonthStampError::Malformed(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(malformed)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(malformed());
        }
        let year: i16 = year.parse().map_err(|_| malformed())?;
        let month: i8 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

impl From<Date> for MonthStamp {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for MonthStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn ms(year: i16, month: i8) -> MonthStamp {
        MonthStamp::new(year, month).unwrap()
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!("2025-03".parse::<MonthStamp>().unwrap(), ms(2025, 3));
        assert_eq!(" 1999-12 ".parse::<MonthStamp>().unwrap(), ms(1999, 12));
    }

    #[test]
    fn test_parse_full_date_truncates() {
        assert_eq!("2024-02-29".parse::<MonthStamp>().unwrap(), ms(2024, 2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2025".parse::<MonthStamp>().is_err());
        assert!("2025-13".parse::<MonthStamp>().is_err());
        assert!("2025-00".parse::<MonthStamp>().is_err());
        assert!("25-01".parse::<MonthStamp>().is_err());
        assert!("2025-1".parse::<MonthStamp>().is_err());
        assert!("2025-02-30".parse::<MonthStamp>().is_err());
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(ms(2025, 1).to_string(), "2025-01");
    }

    #[test]
    fn test_months_since() {
        assert_eq!(ms(2025, 1).months_since(ms(2025, 1)), 0);
        assert_eq!(ms(2026, 3).months_since(ms(2025, 1)), 14);
        assert_eq!(ms(2024, 12).months_since(ms(2025, 1)), -1);
    }

    #[test]
    fn test_add_months_across_years() {
        assert_eq!(ms(2025, 11).add_months(2), ms(2026, 1));
        assert_eq!(ms(2025, 1).add_months(-1), ms(2024, 12));
        assert_eq!(ms(2025, 6).add_months(360), ms(2055, 6));
    }

    #[test]
    fn test_add_months_inverse_of_months_since() {
        let origin = ms(2020, 7);
        for n in [-25, -1, 0, 1, 11, 12, 13, 600] {
            assert_eq!(origin.add_months(n).months_since(origin), n);
        }
    }

    #[test]
    fn test_date_conversion() {
        assert_eq!(MonthStamp::from_date(date(2025, 6, 15)), ms(2025, 6));
        assert_eq!(ms(2025, 6).first_day(), date(2025, 6, 1));
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&ms(2030, 4)).unwrap();
        assert_eq!(json, "\"2030-04\"");
        let back: MonthStamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ms(2030, 4));
        assert!(serde_json::from_str::<MonthStamp>("\"April\"").is_err());
    }
}
