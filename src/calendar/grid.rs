use super::month::YearMonth;
use crate::event::{events_on_day, Event};
use time::{Date, Month};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const WEEKS_IN_GRID: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

/// One slot of a month view, possibly belonging to an adjacent month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) day: u8,
    pub(crate) month: YearMonth,
    pub(crate) is_current_month: bool,
}

impl CalendarDay {
    pub(crate) fn year(&self) -> i32 {
        self.month.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.month.month()
    }

    pub(crate) fn date(&self) -> Option<Date> {
        self.month.day(self.day)
    }

    pub(crate) fn is(&self, date: Date) -> bool {
        self.date() == Some(date)
    }

    pub(crate) fn events<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events_on_day(events, self.day, self.month(), self.year())
    }
}

/// Six full weeks, Sunday first, covering a month and spilling into its
/// neighbors
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    shown: YearMonth,
    cells: [CalendarDay; GRID_CELLS],
}

impl MonthGrid {
    pub(crate) fn generate(shown: YearMonth) -> MonthGrid {
        let lead = shown.first_weekday().number_days_from_sunday();
        let days = shown.days();
        let (prev, next) = shown.neighbors();
        let cells = std::array::from_fn(|i| {
            let i = u8::try_from(i).expect("grid index should fit in a u8");
            if i < lead {
                CalendarDay {
                    day: prev.days() - lead + i + 1,
                    month: prev,
                    is_current_month: false,
                }
            } else if i - lead < days {
                CalendarDay {
                    day: i - lead + 1,
                    month: shown,
                    is_current_month: true,
                }
            } else {
                CalendarDay {
                    day: i - lead - days + 1,
                    month: next,
                    is_current_month: false,
                }
            }
        });
        MonthGrid { shown, cells }
    }

    pub(crate) fn shown(&self) -> YearMonth {
        self.shown
    }

    pub(crate) fn cells(&self) -> &[CalendarDay; GRID_CELLS] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> + '_ {
        self.cells().chunks_exact(DAYS_IN_WEEK)
    }

    /// Index of the cell showing the given date, if the grid covers it
    pub(crate) fn position(&self, date: Date) -> Option<usize> {
        self.cells.iter().position(|cd| cd.is(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    fn current_days(grid: &MonthGrid) -> Vec<u8> {
        grid.cells()
            .iter()
            .filter(|cd| cd.is_current_month)
            .map(|cd| cd.day)
            .collect()
    }

    #[test]
    fn test_always_six_weeks() {
        for year in [1900, 2000, 2015, 2023, 2024, 2025] {
            for m in 0..12 {
                let grid = MonthGrid::generate(YearMonth::from_index(year, m));
                assert_eq!(grid.cells().len(), 42);
                assert_eq!(grid.weeks().count(), 6);
                assert!(grid.weeks().all(|w| w.len() == 7));
            }
        }
    }

    #[test]
    fn test_current_month_cells_match_month_length() {
        for year in [1900, 2000, 2023, 2024] {
            for m in 0..12 {
                let ym = YearMonth::from_index(year, m);
                let grid = MonthGrid::generate(ym);
                let days = current_days(&grid);
                assert_eq!(days, (1..=ym.days()).collect::<Vec<_>>(), "{ym}");
            }
        }
        assert_eq!(
            current_days(&MonthGrid::generate(YearMonth::new(2024, February))).len(),
            29
        );
        assert_eq!(
            current_days(&MonthGrid::generate(YearMonth::new(2023, February))).len(),
            28
        );
    }

    #[test]
    fn test_january_spills_into_previous_december() {
        // 2024-01-01 is a Monday
        let grid = MonthGrid::generate(YearMonth::new(2024, January));
        let first = grid.cells()[0];
        assert_eq!(
            first,
            CalendarDay {
                day: 31,
                month: YearMonth::new(2023, December),
                is_current_month: false,
            }
        );
        assert_eq!(first.month.month0(), 11);
        assert_eq!(grid.cells()[1].day, 1);
        assert!(grid.cells()[1].is_current_month);
    }

    #[test]
    fn test_saturday_january_spills_six_days() {
        // 2022-01-01 is a Saturday
        let grid = MonthGrid::generate(YearMonth::new(2022, January));
        let lead = &grid.cells()[..6];
        assert_eq!(lead.iter().map(|cd| cd.day).collect::<Vec<_>>(), [26, 27, 28, 29, 30, 31]);
        assert!(lead
            .iter()
            .all(|cd| cd.month == YearMonth::new(2021, December) && !cd.is_current_month));
        assert_eq!(grid.cells()[6].day, 1);
        assert!(grid.cells()[6].is_current_month);
    }

    #[test]
    fn test_spill_at_year_bounds() {
        for shown in [
            YearMonth::new(i32::MAX, December),
            YearMonth::new(i32::MIN, January),
        ] {
            let grid = MonthGrid::generate(shown);
            let current = grid
                .cells()
                .iter()
                .filter(|cd| cd.is_current_month)
                .collect::<Vec<_>>();
            assert_eq!(current.len(), usize::from(shown.days()));
            assert!(current.iter().all(|cd| cd.month == shown));
            assert!(grid
                .cells()
                .iter()
                .filter(|cd| !cd.is_current_month)
                .all(|cd| cd.month != shown));
        }
        let grid = MonthGrid::generate(YearMonth::new(i32::MAX, December));
        let last = grid.cells()[41];
        assert_eq!((last.year(), last.month()), (i32::MAX, January));
        let grid = MonthGrid::generate(YearMonth::new(i32::MIN, January));
        let first = grid.cells()[0];
        assert_eq!((first.year(), first.month()), (i32::MIN, December));
        assert_eq!(first.day, 31);
    }

    #[test]
    fn test_position() {
        let grid = MonthGrid::generate(YearMonth::new(2024, April));
        assert_eq!(grid.position(date!(2024 - 03 - 31)), Some(0));
        assert_eq!(grid.position(date!(2024 - 04 - 10)), Some(10));
        assert_eq!(grid.position(date!(2024 - 05 - 11)), Some(41));
        assert_eq!(grid.position(date!(2024 - 05 - 12)), None);
        assert_eq!(grid.position(date!(2023 - 04 - 10)), None);
    }

    #[test]
    fn test_december_spills_into_next_january() {
        // 2024-12-01 is a Sunday, so December fills rows one to five
        let grid = MonthGrid::generate(YearMonth::new(2024, December));
        assert_eq!(grid.cells()[0].day, 1);
        assert!(grid.cells()[0].is_current_month);
        let trailing = &grid.cells()[31..];
        assert_eq!(trailing.len(), 11);
        for (cd, day) in trailing.iter().zip(1..) {
            assert_eq!(cd.day, day);
            assert_eq!(cd.month, YearMonth::new(2025, January));
            assert_eq!(cd.month.month0(), 0);
            assert!(!cd.is_current_month);
        }
    }

    #[test]
    fn test_trailing_days_of_previous_month() {
        // 2024-03-01 is a Friday; February 2024 has 29 days
        let grid = MonthGrid::generate(YearMonth::new(2024, March));
        let lead = grid.cells()[..5]
            .iter()
            .map(|cd| (cd.month.month(), cd.day))
            .collect::<Vec<_>>();
        assert_eq!(
            lead,
            [
                (February, 25),
                (February, 26),
                (February, 27),
                (February, 28),
                (February, 29)
            ]
        );
        assert_eq!(grid.cells()[5].day, 1);
        assert!(grid.cells()[5].is_current_month);
    }

    #[test]
    fn test_february_starting_on_sunday() {
        // 2015-02 fills exactly four rows, so two whole weeks come from March
        let grid = MonthGrid::generate(YearMonth::new(2015, February));
        assert_eq!(grid.cells()[0].day, 1);
        assert!(grid.cells()[0].is_current_month);
        assert_eq!(grid.cells()[28].day, 1);
        assert_eq!(grid.cells()[28].month(), March);
        assert_eq!(grid.cells()[41].day, 14);
    }

    #[test]
    fn test_cells_are_consecutive_dates() {
        let grid = MonthGrid::generate(YearMonth::new(2024, April));
        let dates = grid
            .cells()
            .iter()
            .map(|cd| cd.date().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(dates[0], date!(2024 - 03 - 31));
        for pair in dates.windows(2) {
            assert_eq!(pair[0].next_day(), Some(pair[1]));
        }
        assert!(grid.weeks().all(|w| w[0].date().unwrap().weekday() == time::Weekday::Sunday));
    }

    #[test]
    fn test_generate_is_pure() {
        let ym = YearMonth::new(2024, April);
        assert_eq!(MonthGrid::generate(ym), MonthGrid::generate(ym));
    }
}
