use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const MONTHS_IN_YEAR: i64 = 12;

/// Earliest year a `YearMonth` can hold, leaving room for the December
/// before it
pub(crate) const MIN_YEAR: i32 = i32::MIN + 1;

/// Latest year a `YearMonth` can hold, leaving room for the January after
/// it
pub(crate) const MAX_YEAR: i32 = i32::MAX - 1;

/// A calendar month of a particular year.
///
/// Years run from `MIN_YEAR` to `MAX_YEAR`, including years that
/// `time::Date` cannot represent; operations that need a `Date` return
/// `Option`.  Only [`YearMonth::neighbors`] steps outside that range, so
/// that every month has a month on either side.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// Years outside `MIN_YEAR..=MAX_YEAR` are clamped into it
    pub(crate) const fn new(year: i32, month: Month) -> YearMonth {
        let year = if year < MIN_YEAR {
            MIN_YEAR
        } else if year > MAX_YEAR {
            MAX_YEAR
        } else {
            year
        };
        YearMonth { year, month }
    }

    /// Construct from a 0-based month index (0 = January), carrying any
    /// index outside `0..12` into the year.  Results beyond the supported
    /// years saturate at the first/last month of time.
    pub(crate) fn from_index(year: i32, month0: i64) -> YearMonth {
        let total = (i64::from(year) * MONTHS_IN_YEAR).saturating_add(month0);
        let year = total.div_euclid(MONTHS_IN_YEAR);
        if year < i64::from(MIN_YEAR) {
            return YearMonth::new(MIN_YEAR, Month::January);
        }
        match i32::try_from(year) {
            Ok(year) if year <= MAX_YEAR => {
                let m = u8::try_from(total.rem_euclid(MONTHS_IN_YEAR))
                    .expect("remainder of division by 12 should fit in a u8");
                YearMonth::new(year, Month::January.nth_next(m))
            }
            _ => YearMonth::new(MAX_YEAR, Month::December),
        }
    }

    pub(crate) fn of(date: Date) -> YearMonth {
        YearMonth::new(date.year(), date.month())
    }

    pub(crate) fn year(self) -> i32 {
        self.year
    }

    pub(crate) fn month(self) -> Month {
        self.month
    }

    /// 0-based month index, January = 0
    pub(crate) fn month0(self) -> u8 {
        u8::from(self.month) - 1
    }

    pub(crate) fn advance(self, delta: i32) -> YearMonth {
        YearMonth::from_index(self.year, i64::from(self.month0()) + i64::from(delta))
    }

    pub(crate) fn prev(self) -> YearMonth {
        self.advance(-1)
    }

    pub(crate) fn next(self) -> YearMonth {
        self.advance(1)
    }

    /// The months immediately before and after this one.  Unlike
    /// [`YearMonth::prev`] and [`YearMonth::next`], these never saturate,
    /// and may lie one year outside `MIN_YEAR..=MAX_YEAR`.
    pub(crate) fn neighbors(self) -> (YearMonth, YearMonth) {
        let prev = match self.month {
            Month::January => YearMonth {
                year: self.year - 1,
                month: Month::December,
            },
            m => YearMonth {
                year: self.year,
                month: m.previous(),
            },
        };
        let next = match self.month {
            Month::December => YearMonth {
                year: self.year + 1,
                month: Month::January,
            },
            m => YearMonth {
                year: self.year,
                month: m.next(),
            },
        };
        (prev, next)
    }

    pub(crate) fn days(self) -> u8 {
        self.month.length(self.year)
    }

    /// The day of the week on which the 1st of the month falls
    pub(crate) fn first_weekday(self) -> Weekday {
        // Sakamoto's method, widened so that it is total over every i32 year
        const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let mut y = i64::from(self.year);
        if self.month0() < 2 {
            y -= 1;
        }
        let raw = y + y.div_euclid(4) - y.div_euclid(100)
            + y.div_euclid(400)
            + OFFSETS[usize::from(self.month0())]
            + 1;
        let n = u8::try_from(raw.rem_euclid(7))
            .expect("remainder of division by 7 should fit in a u8");
        Weekday::Sunday.nth_next(n)
    }

    pub(crate) fn day(self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, day).ok()
    }

    pub(crate) fn first_day(self) -> Option<Date> {
        self.day(1)
    }

    /// The date with the given day of the month, or the last day of the month
    /// if the month is shorter
    pub(crate) fn clamped_day(self, day: u8) -> Option<Date> {
        self.day(day.clamp(1, self.days()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}", self.year.unsigned_abs(), u8::from(self.month))
        } else {
            write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
        }
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<YearMonth, ParseYearMonthError> {
        let err = || ParseYearMonthError(s.to_owned());
        let (year, month) = s.rsplit_once('-').ok_or_else(err)?;
        let digits = year.strip_prefix('-').unwrap_or(year);
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || month.len() != 2
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let year = year.parse::<i32>().map_err(|_| err())?;
        let month = month.parse::<u8>().map_err(|_| err())?;
        let month = Month::try_from(month).map_err(|_| err())?;
        Ok(YearMonth::new(year, month))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid month {0:?}: expected YYYY-MM")]
pub(crate) struct ParseYearMonthError(String);
