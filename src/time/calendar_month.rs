use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::time::{Date, InvalidDate, Month, Year};

/// A year and month pair, the granularity at which attendance tabs exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: Year,
    month: Month,
}

impl CalendarMonth {
    #[must_use]
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    #[must_use]
    pub const fn first_day(&self) -> Date {
        Date::from_parts(self.year, self.month, 1)
    }

    #[must_use]
    pub const fn last_day(&self) -> Date {
        Date::from_parts(self.year, self.month, self.year.days_in_month(self.month))
    }

    /// The month after this one.
    #[must_use]
    pub const fn succ(&self) -> Self {
        let year = match self.month {
            Month::December => self.year.next(),
            _ => self.year,
        };

        Self {
            year,
            month: self.month.next(),
        }
    }

    /// Combines this month with a day-of-month marker read from the grid.
    pub fn with_day(&self, day: usize) -> Result<Date, InvalidDate> {
        Date::new(self.year, self.month, day)
    }
}

impl From<Date> for CalendarMonth {
    fn from(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year.as_usize(), self.month.as_usize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a valid calendar month. Expected format: \"YYYY-MM\"")]
pub struct InvalidCalendarMonth {
    input: String,
}

impl InvalidCalendarMonth {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl FromStr for CalendarMonth {
    type Err = InvalidCalendarMonth;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let (year, month) = string
            .split_once('-')
            .ok_or_else(|| InvalidCalendarMonth::new(string))?;

        let year = year
            .parse::<usize>()
            .map_err(|_| InvalidCalendarMonth::new(string))?;
        let month = month
            .parse::<usize>()
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .ok_or_else(|| InvalidCalendarMonth::new(string))?;

        Ok(Self::new(Year::new(year), month))
    }
}
