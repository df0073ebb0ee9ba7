use crate::theme::{DAY_STYLE, HEADER_STYLE, TITLE_STYLE, WEEKEND_STYLE, WEEK_NUMBER_STYLE};
use calgrid::{build_month_grid, days_since_january_first, CivilDate, InvalidArgument, MonthGrid};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

static HEADER: &str = " Wk   Mo   Tu   We   Th   Fr   Sa   Su ";

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of columns per grid cell, including the gap after it
const CELL_WIDTH: u16 = 5;

/// Width of the calendar in columns: the week number column plus seven days,
/// without a gap after the last one
const MAIN_WIDTH: u16 = CELL_WIDTH * 8 - 1;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines below the last week: a blank line and the workday count
const FOOTER_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// A month's grid together with the currently selected day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    grid: MonthGrid,
    workdays: u8,
    selected: Option<u8>,
}

impl MonthView {
    pub(crate) fn new(year: i32, month: u8) -> Result<MonthView, InvalidArgument> {
        let grid = build_month_grid(year, month)?;
        let workdays = grid.workday_count();
        Ok(MonthView {
            grid,
            workdays,
            selected: None,
        })
    }

    pub(crate) fn with_selected(mut self, day: u8) -> Result<MonthView, InvalidArgument> {
        CivilDate::new(self.grid.year(), self.grid.month(), day)?;
        self.selected = Some(day);
        Ok(self)
    }

    pub(crate) fn year(&self) -> i32 {
        self.grid.year()
    }

    pub(crate) fn month(&self) -> u8 {
        self.grid.month()
    }

    pub(crate) fn selected(&self) -> Option<u8> {
        self.selected
    }

    // Returns `false` if the selection could not move (because it is already
    // at the start or end of the month)
    pub(crate) fn move_by(&mut self, delta: i16) -> bool {
        let last = i16::from(self.grid.days_in_month());
        let current = self.selected.map_or(1, i16::from);
        let Ok(day) = u8::try_from((current + delta).clamp(1, last)) else {
            return false;
        };
        if self.selected == Some(day) {
            false
        } else {
            self.selected = Some(day);
            true
        }
    }

    pub(crate) fn days_passed(&self) -> Option<u16> {
        let day = self.selected?;
        days_since_january_first(self.year(), self.month(), day).ok()
    }

    pub(crate) fn title(&self) -> String {
        format!("{} {}", month_name(self.month()), self.year())
    }

    /// Number of lines needed to draw the whole view
    pub(crate) fn height(&self) -> u16 {
        let rows = u16::try_from(self.grid.weeks().len()).unwrap_or(u16::MAX);
        HEADER_LINES
            .saturating_add(rows)
            .saturating_add(FOOTER_LINES)
    }

    pub(crate) fn width(&self) -> u16 {
        MAIN_WIDTH
    }

    /// Renders the view as plain text, one string per line
    pub(crate) fn to_lines(&self) -> Vec<String> {
        let area = Rect::new(0, 0, self.width(), self.height());
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);
        buffer_lines(&buf)
    }
}

impl Widget for &MonthView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.title());
        canvas.draw_header();
        for (week_no, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            canvas.draw_week_number(week_no, week.iso_week());
            for (column, cell) in std::iter::zip(0u16.., week) {
                if let Some(day) = cell.day() {
                    let style = if cell.is_weekend() {
                        WEEKEND_STYLE
                    } else {
                        DAY_STYLE
                    };
                    let s = show_day(day, self.selected == Some(day));
                    canvas.draw_day(week_no, column, s, style);
                }
            }
        }
        canvas.draw_footer(
            self.height().saturating_sub(1),
            &format!("Workdays: {}", self.workdays),
        );
    }
}

pub(crate) fn month_name(month: u8) -> &'static str {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or("")
}

fn show_day(day: u8, is_selected: bool) -> String {
    if is_selected {
        format!("[{day:2}]")
    } else {
        format!(" {day:2} ")
    }
}

/// Returns the symbols of each line of `buf` with trailing whitespace removed
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = usize::from(buf.area.width).max(1);
    buf.content()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(Cell::symbol)
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, TITLE_STYLE);
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, HEADER_STYLE);
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_week_number(&mut self, week_no: u16, iso_week: u8) {
        self.mvprint(
            week_no + HEADER_LINES,
            0,
            format!(" {iso_week:2} "),
            WEEK_NUMBER_STYLE,
        );
    }

    // `column` is 0 for Monday through 6 for Sunday
    fn draw_day(&mut self, week_no: u16, column: u16, s: String, style: Style) {
        self.mvprint(week_no + HEADER_LINES, CELL_WIDTH * (column + 1), s, style);
    }

    fn draw_footer(&mut self, y: u16, s: &str) {
        self.mvprint(y, 0, s, TITLE_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect passed to the Paragraph must lie entirely within the
            // buffer, so clip it to the canvas.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), HEADER_STYLE);
    }
}
