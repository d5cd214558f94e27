//! Calendar month addressing.
//!
//! The backend groups activities by `YYYY-MM`, and the event cache uses the
//! same string as a prefix over its `YYYY-MM-DD` date keys.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{DaybookError, DaybookResult};

/// A validated (year, month) pair, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> DaybookResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DaybookError::InvalidMonth(format!(
                "month {} out of range 1-12",
                month
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(DaybookError::InvalidMonth(format!(
                "year {} must have four digits",
                year
            )));
        }
        Ok(MonthKey { year, month })
    }

    /// The month a calendar date falls in.
    pub fn of_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether a `YYYY-MM-DD` date key belongs to this month.
    ///
    /// This is a plain prefix test, the same check the cache uses as its
    /// memoization signal.
    pub fn contains(&self, date_key: &str) -> bool {
        date_key.starts_with(&self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DaybookError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DaybookError::InvalidMonth(format!("'{}'. Expected YYYY-MM", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month)
    }
}

/// Parse a `YYYY-MM-DD` date key.
pub fn parse_date_key(s: &str) -> DaybookResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DaybookError::InvalidDate(s.to_string()))
}
