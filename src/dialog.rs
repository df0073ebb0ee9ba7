use crate::help::popup;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Widget,
};

/// Dialog reporting how many days of the year passed before the selected day
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct DaysPassed {
    pub(crate) days: u16,
    pub(crate) style: Style,
}

impl DaysPassed {
    pub(crate) fn message(days: u16) -> String {
        if days == 1 {
            String::from("1 day has passed since January 1st")
        } else {
            format!("{days} days have passed since January 1st")
        }
    }
}

impl Widget for DaysPassed {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(vec![
            Line::raw(DaysPassed::message(self.days)),
            Line::raw(""),
            Line::raw("Press the Any Key to dismiss."),
        ]);
        popup(text, " Days Passed ", self.style, area, buf);
    }
}
