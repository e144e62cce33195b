use core::fmt;

use crate::time::Month;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Year(usize);

impl Year {
    #[must_use]
    pub const fn new(year: usize) -> Self {
        Self(year)
    }

    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// A leap year is a calendar year that contains an additional day added to
    /// February, so it has 29 days instead of the regular 28 days.
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        // https://en.wikipedia.org/wiki/Leap_year#Algorithm
        self.0 % 4 == 0 && (self.0 % 100 != 0 || self.0 % 400 == 0)
    }

    #[must_use]
    pub const fn days_in_month(&self, month: Month) -> usize {
        match month {
            Month::January => 31,
            Month::February => {
                if self.is_leap_year() {
                    29
                } else {
                    28
                }
            }
            Month::March => 31,
            Month::April => 30,
            Month::May => 31,
            Month::June => 30,
            Month::July => 31,
            Month::August => 31,
            Month::September => 30,
            Month::October => 31,
            Month::November => 30,
            Month::December => 31,
        }
    }

    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for Year {
    fn from(year: usize) -> Self {
        Self::new(year)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
