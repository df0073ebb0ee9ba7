use crate::dialog::DaysPassed;
use crate::help::Help;
use crate::input::{InputKey, InputOutput, InputState, MonthForm};
use crate::monthview::MonthView;
use crate::theme::BASE_STYLE;
use calgrid::InvalidArgument;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    input: InputState,
    view: Option<MonthView>,
    state: AppState,
}

impl App {
    pub(crate) fn new() -> App {
        App {
            input: InputState::new(),
            view: None,
            state: AppState::Input,
        }
    }

    /// Switches to the calendar screen for the given month, with `day` (or
    /// else the 1st) selected
    pub(crate) fn open(
        &mut self,
        year: i32,
        month: u8,
        day: Option<u8>,
    ) -> Result<(), InvalidArgument> {
        let view = MonthView::new(year, month)?.with_selected(day.unwrap_or(1))?;
        tracing::info!(year, month, selected = ?view.selected(), "showing month");
        self.input = InputState::with_values(year, month);
        self.view = Some(view);
        self.state = AppState::Calendar;
        Ok(())
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
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
                tracing::debug!(?code, ?modifiers, state = ?self.state, "rejected key");
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Input => {
                let input = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Quitting;
                        return true;
                    }
                    KeyCode::Char(c @ '0'..='9') => InputKey::Digit(c),
                    KeyCode::Char('-') => InputKey::Minus,
                    KeyCode::Backspace | KeyCode::Delete => InputKey::Backspace,
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        InputKey::SwitchField
                    }
                    KeyCode::Enter => InputKey::Enter,
                    _ => return false,
                };
                match self.input.handle_input(input) {
                    InputOutput::Ok => true,
                    InputOutput::Invalid => false,
                    InputOutput::Submit { year, month } => match self.open(year, month, None) {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!(error = %e, "cannot show submitted month");
                            false
                        }
                    },
                }
            }
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_selection(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_selection(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(7),
                KeyCode::Enter | KeyCode::Char(' ') => self.show_days_passed(),
                KeyCode::Char('b') | KeyCode::Backspace => {
                    self.state = AppState::Input;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping | AppState::DaysPassed(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_selection(&mut self, delta: i16) -> bool {
        self.view.as_mut().is_some_and(|view| view.move_by(delta))
    }

    fn show_days_passed(&mut self) -> bool {
        match self.view.as_ref().and_then(MonthView::days_passed) {
            Some(days) => {
                tracing::debug!(days, "showing days passed");
                self.state = AppState::DaysPassed(days);
                true
            }
            None => false,
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        if self.state == AppState::Input {
            MonthForm.render(area, buf, &mut self.input);
            return;
        }
        if let Some(view) = self.view.as_ref() {
            let [view_area] = Layout::vertical([view.height()])
                .flex(Flex::Center)
                .areas(area);
            view.render(view_area, buf);
        }
        match self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::DaysPassed(days) => DaysPassed {
                days,
                style: BASE_STYLE,
            }
            .render(area, buf),
            AppState::Input | AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Input,
    Calendar,
    Helping,
    DaysPassed(u16),
    Quitting,
}
