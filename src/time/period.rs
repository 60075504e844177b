//! Discrete delivery periods used to index storage valuation output.
//!
//! A [`TimePeriod`] is a totally ordered value with a notion of adjacency: every period
//! has a well-defined successor, and the distance between two periods is an integer
//! number of steps. Days are represented by [`chrono::NaiveDate`]; coarser granularities
//! are [`Month`] and [`Quarter`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::core::ValuationError;

/// Ordered discrete time period with integer-step adjacency.
pub trait TimePeriod: Copy + Ord + fmt::Debug + fmt::Display {
    /// Period `n` steps after `self` (before it when `n` is negative); `None` when the
    /// result is outside the representable range.
    fn offset(self, n: i64) -> Option<Self>;

    /// Number of steps from `earlier` to `self`; negative when `self` precedes `earlier`.
    fn offset_from(self, earlier: Self) -> i64;

    /// Immediately following period, `None` at the end of the representable range.
    #[inline]
    fn next(self) -> Option<Self> {
        self.offset(1)
    }
}

impl TimePeriod for NaiveDate {
    #[inline]
    fn offset(self, n: i64) -> Option<Self> {
        TimeDelta::try_days(n).and_then(|delta| self.checked_add_signed(delta))
    }

    #[inline]
    fn offset_from(self, earlier: Self) -> i64 {
        self.signed_duration_since(earlier).num_days()
    }
}

/// Calendar month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month; `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, ValuationError> {
        if !(1..=12).contains(&month) {
            return Err(ValuationError::InvalidPeriod(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
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

    /// First calendar day of the month; `None` outside chrono's supported year range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Some(Self {
            year: i32::try_from(ordinal.div_euclid(12)).ok()?,
            month: ordinal.rem_euclid(12) as u32 + 1,
        })
    }
}

impl TimePeriod for Month {
    #[inline]
    fn offset(self, n: i64) -> Option<Self> {
        self.ordinal().checked_add(n).and_then(Self::from_ordinal)
    }

    #[inline]
    fn offset_from(self, earlier: Self) -> i64 {
        self.ordinal() - earlier.ordinal()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ValuationError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .rsplit_once('-')
            .ok_or_else(|| ValuationError::InvalidPeriod(format!("expected YYYY-MM, got {s:?}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| ValuationError::InvalidPeriod(format!("invalid year in {s:?}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| ValuationError::InvalidPeriod(format!("invalid month in {s:?}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = ValuationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

/// Calendar quarter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter {
    year: i32,
    quarter: u32,
}

impl Quarter {
    /// Creates a quarter; `quarter` is 1-based.
    pub fn new(year: i32, quarter: u32) -> Result<Self, ValuationError> {
        if !(1..=4).contains(&quarter) {
            return Err(ValuationError::InvalidPeriod(format!(
                "quarter must be in 1..=4, got {quarter}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Quarter containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u32 {
        self.quarter
    }

    /// First month of the quarter.
    pub fn first_month(&self) -> Month {
        Month {
            year: self.year,
            month: (self.quarter - 1) * 3 + 1,
        }
    }

    fn ordinal(self) -> i64 {
        i64::from(self.year) * 4 + i64::from(self.quarter) - 1
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Some(Self {
            year: i32::try_from(ordinal.div_euclid(4)).ok()?,
            quarter: ordinal.rem_euclid(4) as u32 + 1,
        })
    }
}

impl TimePeriod for Quarter {
    #[inline]
    fn offset(self, n: i64) -> Option<Self> {
        self.ordinal().checked_add(n).and_then(Self::from_ordinal)
    }

    #[inline]
    fn offset_from(self, earlier: Self) -> i64 {
        self.ordinal() - earlier.ordinal()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for Quarter {
    type Err = ValuationError;

    /// Parses `YYYY-Qn`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, quarter) = s
            .rsplit_once("-Q")
            .ok_or_else(|| ValuationError::InvalidPeriod(format!("expected YYYY-Qn, got {s:?}")))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| ValuationError::InvalidPeriod(format!("invalid year in {s:?}")))?;
        let quarter = quarter
            .parse::<u32>()
            .map_err(|_| ValuationError::InvalidPeriod(format!("invalid quarter in {s:?}")))?;
        Self::new(year, quarter)
    }
}

impl TryFrom<String> for Quarter {
    type Error = ValuationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(value: Quarter) -> Self {
        value.to_string()
    }
}
