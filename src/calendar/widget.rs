use super::cursor::MonthCursor;
use super::grid::{CalendarDay, DAYS_IN_WEEK};
use crate::event::Event;
use crate::i18n::Language;
use crate::theme::{
    category_style, ADJACENT_MONTH_STYLE, BASE_STYLE, SELECTED_MODIFIER, TITLE_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

/// Width of the calendar in columns
pub(crate) const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the month title, the weekday header, and its
/// rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar: the day numbers,
/// then the event markers
const WEEK_LINES: u16 = 2;

pub(crate) const GRID_HEIGHT: u16 = HEADER_LINES + WEEK_LINES * 6;

/// Event markers drawn under a day before the rest are summarized with a
/// "+"
const MAX_MARKERS: usize = 3;

const EVENT_MARKER: char = '•';
const MORE_MARKER: char = '+';
const ACS_HLINE: char = '─';

/// A month laid out as six weeks, Sunday first, with a marker under each day
/// for every event on it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    cursor: &'a MonthCursor,
    events: &'a [Event],
    lang: Language,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(cursor: &'a MonthCursor, events: &'a [Event], lang: Language) -> Self {
        MonthView {
            cursor,
            events,
            lang,
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([GRID_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let grid = self.cursor.grid();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.lang.month_title(grid.shown()));
        canvas.draw_header(self.lang.weekday_labels());
        let selected = grid.position(self.cursor.selected());
        for (i, week) in std::iter::zip(0u16.., grid.weeks()) {
            for (j, cd) in std::iter::zip(0u16.., week) {
                let s = show(cd, cd.is(self.cursor.today()));
                let mut style = if cd.is_current_month {
                    BASE_STYLE
                } else {
                    ADJACENT_MONTH_STYLE
                };
                if selected == Some(usize::from(i) * DAYS_IN_WEEK + usize::from(j)) {
                    style = style.add_modifier(SELECTED_MODIFIER);
                }
                canvas.draw_day(i, j, s, style);
                let events = cd.events(self.events);
                for (k, ev) in std::iter::zip(0u16.., events.iter().take(MAX_MARKERS)) {
                    canvas.draw_marker(i, j, k, EVENT_MARKER, category_style(ev.category));
                }
                if events.len() > MAX_MARKERS {
                    canvas.draw_marker(i, j, 3, MORE_MARKER, BASE_STYLE);
                }
            }
        }
    }
}

fn show(cd: &CalendarDay, is_today: bool) -> String {
    if is_today {
        format!("[{:2}]", cd.day)
    } else {
        format!(" {:2} ", cd.day)
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Text::raw(title).width()).unwrap_or(u16::MAX);
        self.mvprint(0, GRID_WIDTH.saturating_sub(width) / 2, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, labels: &[&str; DAYS_IN_WEEK]) {
        for (i, label) in std::iter::zip(0u16.., labels) {
            self.mvprint(1, DAY_WIDTH * i + 1, label, Some(WEEKDAY_STYLE));
        }
        self.hline(2, 0, ACS_HLINE, GRID_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, s: String, style: Style) {
        self.mvprint(week_no * WEEK_LINES + HEADER_LINES, DAY_WIDTH * wd, s, Some(style));
    }

    // Markers sit in the line below the day number, starting one column in
    fn draw_marker(&mut self, week_no: u16, wd: u16, slot: u16, ch: char, style: Style) {
        let y = week_no * WEEK_LINES + HEADER_LINES + 1;
        let x = DAY_WIDTH * wd + 1 + slot;
        self.mvaddch(y, x, ch, style);
    }

    fn mvaddch(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
