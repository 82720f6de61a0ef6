//! Tenor codes and calendar helpers.
//!
//! Market quotes are labelled by offset codes such as `1D`, `7D`, `3M`,
//! `18M` or `10Y`. A [`Tenor`] converts to a nominal year fraction
//! (days over 365, months over 12) for curve pillars, or is added to a
//! calendar date for the swaption grid. Dates falling on a weekend roll to
//! the following Monday; holiday calendars are not modelled.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use super::error::BootstrapError;

/// Unit of a tenor code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenorUnit {
    /// Calendar days
    Day,
    /// Weeks of seven days
    Week,
    /// Calendar months
    Month,
    /// Calendar years
    Year,
}

impl TenorUnit {
    /// Suffix used in tenor codes.
    pub fn code(&self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Week => 'W',
            TenorUnit::Month => 'M',
            TenorUnit::Year => 'Y',
        }
    }
}

/// A market offset such as `18M`.
///
/// # Examples
///
/// ```
/// use arrears_optimiser::bootstrapping::Tenor;
///
/// let tenor: Tenor = "18M".parse().unwrap();
/// assert_eq!(tenor.year_fraction(), 1.5);
/// assert_eq!(tenor.to_string(), "18M");
///
/// let overnight: Tenor = "1D".parse().unwrap();
/// assert!((overnight.year_fraction() - 1.0 / 365.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Create a tenor.
    pub fn new(count: u32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Number of units.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit.
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Nominal length in years: D/365, W = 7D, M/12, Y.
    pub fn year_fraction(&self) -> f64 {
        let n = f64::from(self.count);
        match self.unit {
            TenorUnit::Day => n / 365.0,
            TenorUnit::Week => 7.0 * n / 365.0,
            TenorUnit::Month => n / 12.0,
            TenorUnit::Year => n,
        }
    }

    /// Length in whole months, `None` for day and week tenors.
    pub fn months(&self) -> Option<u32> {
        match self.unit {
            TenorUnit::Month => Some(self.count),
            TenorUnit::Year => Some(12 * self.count),
            TenorUnit::Day | TenorUnit::Week => None,
        }
    }

    /// Unadjusted date `self` after `date`. Month arithmetic clamps to the
    /// end of the month. `None` if the result is not representable.
    pub fn add_to(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            TenorUnit::Day => date.checked_add_days(Days::new(u64::from(self.count))),
            TenorUnit::Week => date.checked_add_days(Days::new(7 * u64::from(self.count))),
            TenorUnit::Month | TenorUnit::Year => {
                date.checked_add_months(Months::new(self.months()?))
            }
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let mut chars = code.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TenorUnit::Day,
            Some('W') => TenorUnit::Week,
            Some('M') => TenorUnit::Month,
            Some('Y') => TenorUnit::Year,
            _ => return Err(BootstrapError::invalid_tenor(s)),
        };
        let count = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| BootstrapError::invalid_tenor(s))?;
        if count == 0 {
            return Err(BootstrapError::invalid_tenor(s));
        }
        Ok(Self::new(count, unit))
    }
}

/// Move a weekend date to the following Monday.
pub fn roll_following(date: NaiveDate) -> NaiveDate {
    let skip = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };
    date + Days::new(skip)
}

/// ACT/365 year fraction between two dates.
pub fn act_365(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / 365.0
}
