use crate::agenda::Agenda;
use crate::calendar::{MonthCursor, MonthView, YearMonth, GRID_HEIGHT, GRID_WIDTH};
use crate::event::{events_on_day, Event};
use crate::help::Help;
use crate::i18n::{Dictionary, Key, Language};
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

/// Columns beyond the calendar's own width given to the agenda panel
const AGENDA_EXTRA_WIDTH: u16 = 24;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    cursor: MonthCursor,
    events: Vec<Event>,
    lang: Language,
    dict: Dictionary,
    state: AppState,
}

impl App {
    pub(crate) fn new(cursor: MonthCursor, events: Vec<Event>, lang: Language) -> App {
        App {
            cursor,
            events,
            lang,
            dict: Dictionary::builtin(),
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                tracing::debug!(?code, ?modifiers, "rejected key");
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.cursor.one_day_backwards().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.cursor.one_day_forwards().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.cursor.one_week_backwards().is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.cursor.one_week_forwards().is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.cursor.one_month_backwards().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => {
                    self.cursor.one_month_forwards().is_ok()
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.cursor.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('L') => {
                    self.lang = self.lang.toggle();
                    tracing::info!(lang = %self.lang, "switched display language");
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char('0') => state.handle_input(JumpToInput::Digit(0)),
                        KeyCode::Char('1') => state.handle_input(JumpToInput::Digit(1)),
                        KeyCode::Char('2') => state.handle_input(JumpToInput::Digit(2)),
                        KeyCode::Char('3') => state.handle_input(JumpToInput::Digit(3)),
                        KeyCode::Char('4') => state.handle_input(JumpToInput::Digit(4)),
                        KeyCode::Char('5') => state.handle_input(JumpToInput::Digit(5)),
                        KeyCode::Char('6') => state.handle_input(JumpToInput::Digit(6)),
                        KeyCode::Char('7') => state.handle_input(JumpToInput::Digit(7)),
                        KeyCode::Char('8') => state.handle_input(JumpToInput::Digit(8)),
                        KeyCode::Char('9') => state.handle_input(JumpToInput::Digit(9)),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(ym) => self.jump_to(ym),
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    // Leaves the dialog open if the month cannot be shown
    fn jump_to(&mut self, ym: YearMonth) -> bool {
        if self.cursor.jump_to(ym).is_ok() {
            self.state = AppState::Calendar;
            true
        } else {
            false
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, agenda_area] =
            Layout::vertical([Constraint::Length(GRID_HEIGHT), Constraint::Min(0)]).areas(area);
        MonthView::new(&self.cursor, &self.events, self.lang).render(cal_area, buf);
        let [agenda_area] = Layout::horizontal([GRID_WIDTH + AGENDA_EXTRA_WIDTH])
            .flex(Flex::Center)
            .areas(agenda_area);
        let selected = self.cursor.selected();
        let events = events_on_day(&self.events, selected.day(), selected.month(), selected.year());
        Agenda::new(selected, events, self.lang, &self.dict).render(agenda_area, buf);
        if self.state == AppState::Helping {
            Help::new(BASE_STYLE, self.lang, &self.dict).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo::new(self.dict.lookup(self.lang, Key::JumpTo)).render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
