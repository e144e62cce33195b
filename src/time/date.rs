use core::fmt;

use thiserror::Error;
use ::time::OffsetDateTime;

use crate::time::{Month, Year};

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        const _YEAR: $crate::time::Year = $crate::time::Year::new($year);
        static_assertions::const_assert!($month >= 1 && $month <= 12);

        const _MONTH: $crate::time::Month = $crate::time::Month::new($month);

        // validate the day
        static_assertions::const_assert!($day != 0);
        static_assertions::const_assert!($day <= _YEAR.days_in_month(_MONTH));

        $crate::time::Date::from_parts(_YEAR, _MONTH, $day)
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: Year,
    month: Month,
    day: usize,
}

impl Date {
    pub fn new(year: impl Into<Year>, month: Month, day: usize) -> Result<Self, InvalidDate> {
        let year = year.into();
        if year.days_in_month(month) < day || day == 0 {
            return Err(InvalidDate::InvalidDay { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    #[doc(hidden)]
    #[must_use]
    pub const fn from_parts(year: Year, month: Month, day: usize) -> Self {
        debug_assert!(day != 0 && day <= year.days_in_month(month));
        Self { year, month, day }
    }

    /// The current date, in the local timezone if it can be determined.
    #[must_use]
    pub fn today() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::from(now.date())
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> usize {
        self.day
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("{day:02} is not a valid day for {year}-{month:02}")]
    InvalidDay {
        year: Year,
        month: Month,
        day: usize,
    },
}

impl From<::time::Date> for Date {
    fn from(date: ::time::Date) -> Self {
        Self {
            year: Year::new(date.year().unsigned_abs() as usize),
            month: Month::new(date.month() as usize),
            day: date.day() as usize,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.as_usize(),
            self.month.as_usize(),
            self.day
        )
    }
}
