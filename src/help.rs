use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Select previous day\n",
    "l, RIGHT        Select next day\n",
    "k, UP           Select same day last week\n",
    "j, DOWN         Select same day next week\n",
    "ENTER, SPACE    Show days since January 1st\n",
    "b, BACKSPACE    Choose another month\n",
    "?               Show this help\n",
    "q, ESC          Quit\n",
    "\n",
    "Press the Any Key to dismiss.\n",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        popup(Text::from(lines), " Commands ", self.0, area, buf);
    }
}

/// Draws `text` in a bordered box with the given title, centered in `area`
/// and surrounded by a column of blank space on either side
pub(crate) fn popup(text: Text<'_>, title: &str, style: Style, area: Rect, buf: &mut Buffer) {
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
                .title(title)
                .title_alignment(Alignment::Center),
        )
        .style(style);
    let [popup_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [popup_area] = Layout::vertical([height])
        .flex(Flex::Center)
        .areas(popup_area);
    let outer_area = Rect {
        x: popup_area.x.saturating_sub(1),
        y: popup_area.y,
        width: popup_area.width.saturating_add(2),
        height: popup_area.height,
    }
    .intersection(area);
    Clear.render(outer_area, buf);
    Block::new().style(style).render(outer_area, buf);
    para.render(popup_area, buf);
}
