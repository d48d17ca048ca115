mod cursor;
mod grid;
mod month;
mod widget;
pub(crate) use self::cursor::MonthCursor;
pub(crate) use self::month::YearMonth;
pub(crate) use self::widget::{MonthView, GRID_HEIGHT, GRID_WIDTH};
