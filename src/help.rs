use crate::i18n::{Dictionary, Key, Language};
use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static COMMANDS: &[(&str, Key)] = &[
    ("h, LEFT", Key::HelpDay),
    ("l, RIGHT", Key::HelpDay),
    ("k, UP", Key::HelpWeek),
    ("j, DOWN", Key::HelpWeek),
    ("p, PAGE UP", Key::HelpMonth),
    ("n, PAGE DOWN", Key::HelpMonth),
    ("0, HOME", Key::HelpToday),
    ("g", Key::HelpJump),
    ("L", Key::HelpLanguage),
    ("?", Key::HelpHelp),
    ("q, ESC", Key::HelpQuit),
];

const KEYS_WIDTH: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a> {
    style: Style,
    lang: Language,
    dict: &'a Dictionary,
}

impl<'a> Help<'a> {
    pub(crate) fn new(style: Style, lang: Language, dict: &'a Dictionary) -> Self {
        Help { style, lang, dict }
    }

    fn to_text(self) -> Text<'a> {
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, key)| {
                Line::raw(format!("{keys:KEYS_WIDTH$}{}", self.dict.lookup(self.lang, key)))
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(self.dict.lookup(self.lang, Key::HelpDismiss)));
        Text::from(lines)
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(format!(" {} ", self.dict.lookup(self.lang, Key::Commands)))
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
