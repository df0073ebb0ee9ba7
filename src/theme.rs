use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const DAY_STYLE: Style = BASE_STYLE;

pub(crate) const WEEKEND_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) mod input {
    use super::*;

    pub(crate) const FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const FOCUSED_FIELD_STYLE: Style = FIELD_STYLE.fg(Color::LightYellow);

    pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const DISABLED_ENTER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
