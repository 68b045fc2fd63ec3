use crate::calendar::{CalendarPane, GridState};
use crate::datepick::{DatePicker, DatePickerInput, DatePickerOutput, DatePickerState};
use crate::diary::Journal;
use crate::help::Help;
use crate::home::HomePane;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

/// Screen composition and navigation.  One blocking loop: draw, read a key,
/// mutate state.  Nothing observes anything; widgets are rebuilt from state
/// on every draw.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    journal: Journal,
    grid: GridState,
    pane: CalendarPane,
    state: AppState,
}

impl App {
    pub(crate) fn new(journal: Journal, grid: GridState, pane: CalendarPane) -> App {
        App {
            journal,
            grid,
            pane,
            state: AppState::Browsing(Screen::Home),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
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
            AppState::Browsing(Screen::Home) => match key {
                KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                    self.journal.switch_tab();
                    true
                }
                KeyCode::Char('j') | KeyCode::Down => self.journal.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.journal.select_previous(),
                KeyCode::Char('f') => self.journal.toggle_favorite(),
                KeyCode::Char('c') | KeyCode::Enter => {
                    self.open_calendar();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Picking(Screen::Home, DatePickerState::new());
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping(Screen::Home);
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Browsing(Screen::Calendar) => match key {
                KeyCode::Char('h') | KeyCode::Left => self.grid.previous_day().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.grid.next_day().is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.grid.forward_period().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.grid.backward_period().is_ok(),
                KeyCode::Char('m') => {
                    self.grid.toggle_granularity();
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.grid.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Picking(Screen::Calendar, DatePickerState::new());
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping(Screen::Calendar);
                    true
                }
                KeyCode::Char('b') | KeyCode::Esc => {
                    self.state = AppState::Browsing(Screen::Home);
                    true
                }
                KeyCode::Char('q') => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping(screen) => {
                self.state = AppState::Browsing(*screen);
                true
            }
            AppState::Picking(origin, picker) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Browsing(*origin);
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => picker.handle_input(DatePickerInput::Negative),
                        KeyCode::Char('+') => picker.handle_input(DatePickerInput::Positive),
                        KeyCode::Char(c @ '0'..='9') => {
                            let digit = u8::try_from(c.to_digit(10).unwrap_or(0)).unwrap_or(0);
                            picker.handle_input(DatePickerInput::Digit(digit))
                        }
                        KeyCode::Backspace | KeyCode::Delete => {
                            picker.handle_input(DatePickerInput::Backspace)
                        }
                        KeyCode::Enter => picker.handle_input(DatePickerInput::Enter),
                        _ => DatePickerOutput::Invalid,
                    };
                    match output {
                        DatePickerOutput::Ok => true,
                        DatePickerOutput::Invalid => false,
                        DatePickerOutput::Accept(date) => {
                            self.grid.jump_to(date);
                            self.state = AppState::Browsing(Screen::Calendar);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    /// Shows the calendar, anchored at the selected entry's date when the
    /// home screen has one.
    fn open_calendar(&mut self) {
        if let Some(entry) = self.journal.selected_entry() {
            self.grid.jump_to(entry.date);
        }
        self.state = AppState::Browsing(Screen::Calendar);
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let screen = match self.state {
            AppState::Browsing(screen)
            | AppState::Helping(screen)
            | AppState::Picking(screen, _) => screen,
            AppState::Quitting => Screen::Calendar,
        };
        match screen {
            Screen::Home => HomePane.render(area, buf, &mut self.journal),
            Screen::Calendar => self.pane.render(area, buf, &mut self.grid),
        }
        if matches!(self.state, AppState::Helping(_)) {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Picking(_, ref mut picker) = self.state {
            DatePicker.render(area, buf, picker);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Screen {
    Home,
    Calendar,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Browsing(Screen),
    Helping(Screen),
    Picking(Screen, DatePickerState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Granularity, SizeClass};
    use time::macros::date;

    fn app() -> App {
        let today = date!(2021 - 02 - 15);
        App::new(
            Journal::sample(today),
            GridState::new(today),
            CalendarPane::new(SizeClass::Regular),
        )
    }

    #[test]
    fn enter_opens_calendar_at_entry_date() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('j')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Browsing(Screen::Calendar));
        assert_eq!(app.grid.anchor(), date!(2021 - 02 - 14));
    }

    #[test]
    fn escape_backs_out_then_quits() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Browsing(Screen::Home));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }

    #[test]
    fn granularity_toggle_from_keyboard() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.handle_key(KeyCode::Char('m')));
        assert_eq!(app.grid.granularity(), Granularity::Month);
    }

    #[test]
    fn picker_jump_lands_on_calendar() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "20210201".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Browsing(Screen::Calendar));
        assert_eq!(app.grid.anchor(), date!(2021 - 02 - 01));
    }

    #[test]
    fn picker_cancel_returns_to_origin_screen() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Char('2')));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Browsing(Screen::Home));
    }

    #[test]
    fn help_returns_to_origin_screen() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Browsing(Screen::Home));
    }

    #[test]
    fn invalid_key_reports_failure() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('z')));
    }
}
