//! Day-precise time management for ledger entries
//!
//! Dates are `YYYY-Mmm-DD`, not a number of seconds. The loader validates
//! user-written dates against month lengths and leap years, and the
//! estimator only ever inspects the year and month of a date.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999.
///
/// All methods execute in constant time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:02}", self.year, self.month, self.day)
    }
}

/// Twelve months in the year, identified by their 3-letter abbreviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, PartialOrd, Ord)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Calendar number of this month, in the range 1..=12
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => {
                if is_leap(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

impl std::str::FromStr for Month {
    type Err = ();
    /// Parse a month from its 3-letter name (`"Jan"`, `"Feb"`, `"Mar"`, ...)
    fn from_str(s: &str) -> Result<Self, ()> {
        use Month::*;
        Ok(match s {
            "Jan" => Jan,
            "Feb" => Feb,
            "Mar" => Mar,
            "Apr" => Apr,
            "May" => May,
            "Jun" => Jun,
            "Jul" => Jul,
            "Aug" => Aug,
            "Sep" => Sep,
            "Oct" => Oct,
            "Nov" => Nov,
            "Dec" => Dec,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    /// year is outside of 1000..=9999
    UnsupportedYear(usize),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self {
                year: year as u16,
                month,
                day: day as u8,
            })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// `self.month` accessor
    pub fn month(&self) -> Month {
        self.month
    }

    /// `self.year` accessor
    pub fn year(&self) -> u16 {
        self.year
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => {
                write!(f, "{} is a short month, it does not have a {}th day", m, d)
            }
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(self) -> String {
        use DateError::*;
        match self {
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            NotBissextile(y) => format!("did you mean {y}-Feb-28 or {y}-Mar-01 ?", y = y),
            MonthTooShort(m, d) => format!(
                "{} is only {} days long",
                m,
                if m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Month::*, *};

    #[test]
    fn bissextile_check() {
        macro_rules! yes {
            ( $y:expr ) => {
                assert!(is_leap($y));
            };
        }
        macro_rules! no {
            ( $y:expr ) => {
                assert!(!is_leap($y));
            };
        }
        yes!(2004);
        no!(2100);
        yes!(2000);
        no!(2001);
        no!(2010);
        yes!(2012);
    }

    macro_rules! ok {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(
                Date::from($y, $m, $d),
                Ok(Date {
                    year: $y,
                    month: $m,
                    day: $d
                })
            );
        };
    }
    macro_rules! short {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(Date::from($y, $m, $d), Err(DateError::MonthTooShort($m, $d)));
        };
    }
    macro_rules! nbiss {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(Date::from($y, $m, $d), Err(DateError::NotBissextile($y)));
        };
    }
    macro_rules! invalid {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(Date::from($y, $m, $d), Err(DateError::InvalidDay($d)));
        };
    }

    #[test]
    fn long_months() {
        ok!(2020-Jan-31);
        ok!(2020-Mar-31);
        short!(2020-Apr-31);
        ok!(2020-May-31);
        short!(2020-Jun-31);
        ok!(2020-Jul-31);
        ok!(2020-Aug-31);
        short!(2020-Sep-31);
        ok!(2020-Oct-31);
        short!(2020-Nov-31);
        ok!(2020-Dec-31);
    }

    #[test]
    fn normal_days() {
        invalid!(2020-Dec-45);
        invalid!(2020-Jan-32);
        invalid!(2020-Jan-0);
        ok!(2020-Mar-20);
        ok!(2020-Apr-10);
    }

    #[test]
    fn february() {
        short!(2020-Feb-31);
        short!(2020-Feb-30);
        ok!(2020-Feb-29);
        ok!(2020-Feb-28);
        short!(2021-Feb-31);
        short!(2021-Feb-30);
        nbiss!(2021-Feb-29);
        ok!(2021-Feb-28);
    }

    #[test]
    fn month_names() {
        assert_eq!("Jan".parse::<Month>(), Ok(Jan));
        assert_eq!("Dec".parse::<Month>(), Ok(Dec));
        assert_eq!("January".parse::<Month>(), Err(()));
        assert_eq!("jan".parse::<Month>(), Err(()));
    }

    #[test]
    fn month_numbers() {
        assert_eq!(Jan.number(), 1);
        assert_eq!(Aug.number(), 8);
        assert_eq!(Dec.number(), 12);
        for n in 0..12 {
            assert_eq!(Month::from_usize(n).unwrap().number(), n + 1);
        }
    }
}
