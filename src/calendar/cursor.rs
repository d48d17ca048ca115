use super::grid::MonthGrid;
use super::month::YearMonth;
use thiserror::Error;
use time::{Date, Duration};

/// The month on display plus the day the user has selected in it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthCursor {
    today: Date,
    shown: YearMonth,
    // Invariant: `selected` always lies within `shown`
    selected: Date,
}

impl MonthCursor {
    pub(crate) fn new(today: Date) -> Self {
        MonthCursor {
            today,
            shown: YearMonth::of(today),
            selected: today,
        }
    }

    /// Open on a different month, keeping today's day of the month as the
    /// selection where possible
    pub(crate) fn start_month(mut self, ym: YearMonth) -> Result<Self, OutOfTimeError> {
        if ym != self.shown {
            self.selected = ym.clamped_day(self.today.day()).ok_or(OutOfTimeError)?;
            self.shown = ym;
        }
        Ok(self)
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn shown(&self) -> YearMonth {
        self.shown
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::generate(self.shown)
    }

    pub(crate) fn advance(&mut self, delta: i32) -> Result<(), OutOfTimeError> {
        let ym = self.shown.advance(delta);
        let selected = ym.clamped_day(self.selected.day()).ok_or(OutOfTimeError)?;
        self.show(ym, selected);
        Ok(())
    }

    pub(crate) fn one_month_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.advance(1)
    }

    pub(crate) fn one_month_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.advance(-1)
    }

    pub(crate) fn one_day_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.move_selection(1)
    }

    pub(crate) fn one_day_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.move_selection(-1)
    }

    pub(crate) fn one_week_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.move_selection(7)
    }

    pub(crate) fn one_week_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.move_selection(-7)
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.show(YearMonth::of(self.today), self.today);
    }

    pub(crate) fn jump_to(&mut self, ym: YearMonth) -> Result<(), OutOfTimeError> {
        let selected = if ym == YearMonth::of(self.today) {
            self.today
        } else {
            ym.clamped_day(self.selected.day()).ok_or(OutOfTimeError)?
        };
        self.show(ym, selected);
        Ok(())
    }

    // A move of at most a week crosses at most one month boundary
    fn move_selection(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let date = self
            .selected
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        let ym = if YearMonth::of(date) == self.shown {
            self.shown
        } else if date > self.selected {
            self.shown.next()
        } else {
            self.shown.prev()
        };
        self.show(ym, date);
        Ok(())
    }

    fn show(&mut self, ym: YearMonth, selected: Date) {
        debug_assert_eq!(YearMonth::of(selected), ym, "selection must lie in shown month");
        if ym != self.shown {
            tracing::debug!(month = %ym, "showing month");
        }
        self.shown = ym;
        self.selected = selected;
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    #[test]
    fn test_new() {
        let cursor = MonthCursor::new(date!(2024 - 04 - 10));
        assert_eq!(cursor.shown(), YearMonth::new(2024, April));
        assert_eq!(cursor.selected(), date!(2024 - 04 - 10));
        assert_eq!(cursor.grid().shown(), cursor.shown());
    }

    #[test]
    fn test_start_month() {
        let cursor = MonthCursor::new(date!(2024 - 03 - 31))
            .start_month(YearMonth::new(2024, February))
            .unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2024, February));
        assert_eq!(cursor.selected(), date!(2024 - 02 - 29));
        assert_eq!(cursor.today(), date!(2024 - 03 - 31));
        assert_eq!(
            MonthCursor::new(date!(2024 - 03 - 31)).start_month(YearMonth::new(12000, May)),
            Err(OutOfTimeError)
        );
    }

    #[test]
    fn test_month_navigation_across_years() {
        let mut cursor = MonthCursor::new(date!(2024 - 01 - 31));
        cursor.one_month_backwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2023, December));
        assert_eq!(cursor.selected(), date!(2023 - 12 - 31));
        cursor.one_month_forwards().unwrap();
        cursor.one_month_forwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2024, February));
        assert_eq!(cursor.selected(), date!(2024 - 02 - 29));
        cursor.advance(10).unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2024, December));
        cursor.one_month_forwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2025, January));
        assert_eq!(cursor.selected(), date!(2025 - 01 - 29));
    }

    #[test]
    fn test_day_moves_cross_month() {
        let mut cursor = MonthCursor::new(date!(2024 - 04 - 30));
        cursor.one_day_forwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2024, May));
        assert_eq!(cursor.selected(), date!(2024 - 05 - 01));
        cursor.one_week_backwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2024, April));
        assert_eq!(cursor.selected(), date!(2024 - 04 - 24));
        cursor.one_week_forwards().unwrap();
        cursor.one_day_backwards().unwrap();
        assert_eq!(cursor.selected(), date!(2024 - 04 - 30));
        assert_eq!(cursor.shown(), YearMonth::new(2024, April));
    }

    #[test]
    fn test_day_moves_cross_year() {
        let mut cursor = MonthCursor::new(date!(2024 - 12 - 28));
        cursor.one_week_forwards().unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(2025, January));
        assert_eq!(cursor.selected(), date!(2025 - 01 - 04));
    }

    #[test]
    fn test_jump() {
        let mut cursor = MonthCursor::new(date!(2024 - 04 - 10));
        cursor.jump_to(YearMonth::new(1999, February)).unwrap();
        assert_eq!(cursor.shown(), YearMonth::new(1999, February));
        assert_eq!(cursor.selected(), date!(1999 - 02 - 10));
        cursor.jump_to_today();
        assert_eq!(cursor.shown(), YearMonth::new(2024, April));
        assert_eq!(cursor.selected(), date!(2024 - 04 - 10));
        assert!(cursor.jump_to(YearMonth::new(-20000, May)).is_err());
        assert_eq!(cursor.shown(), YearMonth::new(2024, April));
    }

    #[test]
    fn test_end_of_time() {
        let mut cursor = MonthCursor::new(date!(9999 - 12 - 31));
        assert_eq!(cursor.one_day_forwards(), Err(OutOfTimeError));
        assert_eq!(cursor.one_month_forwards(), Err(OutOfTimeError));
        assert_eq!(cursor.selected(), date!(9999 - 12 - 31));
        assert!(cursor.one_month_backwards().is_ok());
        assert_eq!(cursor.selected(), date!(9999 - 11 - 30));
    }
}
