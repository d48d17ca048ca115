use crate::event::Category;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Days spilling over from the previous or next month
pub(crate) const ADJACENT_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const SELECTED_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const MEETING_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) const DEADLINE_STYLE: Style = BASE_STYLE
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

pub(crate) const WORKSHOP_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

pub(crate) const EVENT_TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const DETAIL_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) fn category_style(category: Category) -> Style {
    match category {
        Category::Meeting => MEETING_STYLE,
        Category::Deadline => DEADLINE_STYLE,
        Category::Workshop => WORKSHOP_STYLE,
    }
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
