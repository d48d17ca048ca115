use crate::event::Event;
use crate::i18n::{Dictionary, Key, Language};
use crate::theme::{
    category_style, ADJACENT_MONTH_STYLE, BASE_STYLE, DETAIL_STYLE, EVENT_TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use time::Date;

/// The events of one day, listed in the order they were supplied
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Agenda<'a> {
    date: Date,
    events: Vec<&'a Event>,
    lang: Language,
    dict: &'a Dictionary,
}

impl<'a> Agenda<'a> {
    pub(crate) fn new(
        date: Date,
        events: Vec<&'a Event>,
        lang: Language,
        dict: &'a Dictionary,
    ) -> Self {
        Agenda {
            date,
            events,
            lang,
            dict,
        }
    }

    fn to_text(&self) -> Text<'a> {
        let lang = self.lang;
        let dict = self.dict;
        if self.events.is_empty() {
            return Text::from(Line::styled(
                dict.lookup(lang, Key::NoEvents).to_owned(),
                ADJACENT_MONTH_STYLE,
            ));
        }
        let mut lines = Vec::new();
        for &ev in &self.events {
            lines.push(Line::from_iter([
                Span::styled(
                    format!("[{}]", dict.lookup(lang, ev.category.key())),
                    category_style(ev.category),
                ),
                Span::raw(" "),
                Span::raw(self.time_range(ev)),
                Span::raw("  "),
                Span::styled(ev.title.get(lang), EVENT_TITLE_STYLE),
            ]));
            let location = ev.location.get(lang);
            if !location.is_empty() {
                lines.push(Line::styled(
                    format!("    {}: {location}", dict.lookup(lang, Key::Location)),
                    DETAIL_STYLE,
                ));
            }
            if !ev.participants.is_empty() {
                lines.push(Line::styled(
                    format!(
                        "    {}: {}",
                        dict.lookup(lang, Key::Participants),
                        ev.participants.join(", ")
                    ),
                    DETAIL_STYLE,
                ));
            }
        }
        Text::from(lines)
    }

    fn time_range(&self, ev: &Event) -> String {
        if ev.is_all_day() {
            self.dict.lookup(self.lang, Key::AllDay).to_owned()
        } else if ev.end_time.is_empty() {
            ev.start_time.clone()
        } else {
            format!("{}–{}", ev.start_time, ev.end_time)
        }
    }
}

impl Widget for Agenda<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} {} ", self.dict.lookup(self.lang, Key::EventsOn), self.date);
        Paragraph::new(self.to_text())
            .block(Block::bordered().title(title))
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
