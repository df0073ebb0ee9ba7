use crate::theme::{
    input::{
        DISABLED_ENTER_STYLE, ERROR_STYLE, FIELD_STYLE, FOCUSED_FIELD_STYLE, READY_ENTER_STYLE,
    },
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 32;
const OUTER_HEIGHT: u16 = 12;

/// Maximum number of characters that may be typed into each field
const MONTH_WIDTH: usize = 2;
// Room for a sign and the ten digits of `i32::MIN`
const YEAR_WIDTH: usize = 11;

static INVALID_MONTH: &str = "Invalid month (1-12)";
static INVALID_YEAR: &str = "Invalid year";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthForm;

impl StatefulWidget for MonthForm {
    type State = InputState;

    /*
     * ................................
     * .┌──── Select a Month ────────┐.
     * .│                            │.
     * .│ Month: MM                  │.
     * .│ Year:  YYYYY               │.
     * .│                            │.
     * .│ Invalid month (1-12)       │.
     * .│ Invalid year               │.
     * .│                            │.
     * .│ [ENTER] Show calendar      │.
     * .└────────────────────────────┘.
     * ................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Select a Month ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Focus {
    #[default]
    Month,
    Year,
}

/// Contents of the month & year entry form
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputState {
    month: String,
    year: String,
    focus: Focus,
}

impl InputState {
    pub(crate) fn new() -> InputState {
        InputState::default()
    }

    /// Returns a form prefilled with the given month & year, with the month
    /// field focused
    pub(crate) fn with_values(year: i32, month: u8) -> InputState {
        InputState {
            month: month.to_string(),
            year: year.to_string(),
            focus: Focus::Month,
        }
    }

    pub(crate) fn month_error(&self) -> Option<&'static str> {
        (!self.month.is_empty() && parse_month(&self.month).is_none()).then_some(INVALID_MONTH)
    }

    pub(crate) fn year_error(&self) -> Option<&'static str> {
        (!self.year.is_empty() && parse_year(&self.year).is_none()).then_some(INVALID_YEAR)
    }

    /// Returns the entered year & month if both fields are filled in and
    /// valid
    pub(crate) fn value(&self) -> Option<(i32, u8)> {
        Some((parse_year(&self.year)?, parse_month(&self.month)?))
    }

    fn focused_mut(&mut self) -> (&mut String, usize) {
        match self.focus {
            Focus::Month => (&mut self.month, MONTH_WIDTH),
            Focus::Year => (&mut self.year, YEAR_WIDTH),
        }
    }

    pub(crate) fn handle_input(&mut self, input: InputKey) -> InputOutput {
        match input {
            InputKey::Digit(c) => {
                let (field, width) = self.focused_mut();
                if field.len() < width {
                    field.push(c);
                    InputOutput::Ok
                } else {
                    InputOutput::Invalid
                }
            }
            InputKey::Minus => {
                if self.focus == Focus::Year && self.year.is_empty() {
                    self.year.push('-');
                    InputOutput::Ok
                } else {
                    InputOutput::Invalid
                }
            }
            InputKey::Backspace => {
                let (field, _) = self.focused_mut();
                if field.pop().is_some() {
                    InputOutput::Ok
                } else {
                    InputOutput::Invalid
                }
            }
            InputKey::SwitchField => {
                self.focus = match self.focus {
                    Focus::Month => Focus::Year,
                    Focus::Year => Focus::Month,
                };
                InputOutput::Ok
            }
            InputKey::Enter => match self.value() {
                Some((year, month)) => InputOutput::Submit { year, month },
                None => InputOutput::Invalid,
            },
        }
    }

    fn to_text(&self) -> Text<'static> {
        let mut lines = vec![
            Line::styled("", BASE_STYLE),
            self.field_line("Month: ", &self.month, MONTH_WIDTH, Focus::Month),
            self.field_line("Year:  ", &self.year, YEAR_WIDTH, Focus::Year),
            Line::styled("", BASE_STYLE),
        ];
        for err in [self.month_error(), self.year_error()] {
            lines.push(Line::styled(err.unwrap_or_default(), ERROR_STYLE));
        }
        lines.push(Line::styled("", BASE_STYLE));
        // Style a span and convert it to a line rather than creating a styled
        // line directly so that the rest of the line is not underlined:
        lines.push(Line::from(Span::styled(
            "[ENTER] Show calendar",
            if self.value().is_some() {
                READY_ENTER_STYLE
            } else {
                DISABLED_ENTER_STYLE
            },
        )));
        Text::from(lines)
    }

    fn field_line(
        &self,
        label: &'static str,
        value: &str,
        width: usize,
        focus: Focus,
    ) -> Line<'static> {
        let style: Style = if self.focus == focus {
            FOCUSED_FIELD_STYLE
        } else {
            FIELD_STYLE
        };
        Line::from_iter([
            Span::styled(label, BASE_STYLE),
            Span::styled(format!("{value:<width$}"), style),
        ])
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputKey {
    Digit(char),
    Minus,
    Backspace,
    SwitchField,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputOutput {
    Ok,
    Invalid,
    Submit { year: i32, month: u8 },
}

fn parse_month(s: &str) -> Option<u8> {
    s.parse::<u8>().ok().filter(|m| (1..=12).contains(m))
}

fn parse_year(s: &str) -> Option<i32> {
    s.parse::<i32>().ok()
}
