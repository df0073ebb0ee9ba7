use crate::civil::{month_length, to_month, CivilDate};
use crate::error::InvalidArgument;

/// Number of days (and thus grid columns) in a week
pub const DAYS_IN_WEEK: usize = 7;

/// Columns of the weekend days (Saturday and Sunday) in a Monday-first week
const WEEKEND_COLUMNS: [usize; 2] = [5, 6];

/// Lays out the given month as a Monday-first grid of weeks.
///
/// # Errors
///
/// Fails if `month` is not in `1..=12`.
pub fn build_month_grid(year: i32, month: u8) -> Result<MonthGrid, InvalidArgument> {
    MonthGrid::new(year, month)
}

/// Returns the number of Mondays through Fridays in the given month.
///
/// # Errors
///
/// Fails if `month` is not in `1..=12`.
pub fn workday_count(year: i32, month: u8) -> Result<u8, InvalidArgument> {
    MonthGrid::new(year, month).map(|grid| grid.workday_count())
}

/// A single cell of a [`MonthGrid`]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayCell {
    day: Option<u8>,
    is_weekend: bool,
}

impl DayCell {
    fn padding(column: usize) -> DayCell {
        DayCell {
            day: None,
            is_weekend: WEEKEND_COLUMNS.contains(&column),
        }
    }

    fn in_month(day: u8, column: usize) -> DayCell {
        DayCell {
            day: Some(day),
            is_weekend: WEEKEND_COLUMNS.contains(&column),
        }
    }

    /// The day of the month, or `None` for a cell outside the month
    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// Whether the cell's column is Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    pub fn is_padding(&self) -> bool {
        self.day.is_none()
    }
}

/// One Monday-to-Sunday row of a [`MonthGrid`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekRow {
    iso_week: u8,
    days: [DayCell; DAYS_IN_WEEK],
}

impl WeekRow {
    /// ISO 8601 week number of the days in this row
    pub fn iso_week(&self) -> u8 {
        self.iso_week
    }

    pub fn days(&self) -> &[DayCell; DAYS_IN_WEEK] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayCell> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a WeekRow {
    type Item = &'a DayCell;
    type IntoIter = std::slice::Iter<'a, DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The days of a month laid out in Monday-first weeks, with the days before
/// the 1st and after the last day of the month left as padding
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
// Invariant: `weeks` is non-empty, and its non-padding cells hold the days
// 1 through `days_in_month` in order
pub struct MonthGrid {
    year: i32,
    month: u8,
    days_in_month: u8,
    offset: u8,
    weeks: Vec<WeekRow>,
}

impl MonthGrid {
    fn new(year: i32, month: u8) -> Result<MonthGrid, InvalidArgument> {
        let first = CivilDate::new(year, month, 1)?;
        let n = month_length(year, to_month(month)?);
        let offset = first.weekday_offset();
        let total = usize::from(offset) + usize::from(n);
        let rows = total.div_ceil(DAYS_IN_WEEK);
        let mut weeks = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut days = [DayCell::default(); DAYS_IN_WEEK];
            for (column, cell) in days.iter_mut().enumerate() {
                let index = row * DAYS_IN_WEEK + column;
                *cell = match day_at(index, offset, n) {
                    Some(day) => DayCell::in_month(day, column),
                    None => DayCell::padding(column),
                };
            }
            // The week is that of the row's first day.  A row without any
            // days of the month uses the month's last day.
            let first_in_row = ((row * DAYS_IN_WEEK) + 1).saturating_sub(usize::from(offset));
            let representative = u8::try_from(first_in_row).unwrap_or(n).clamp(1, n);
            let iso_week = CivilDate::new(year, month, representative)?.iso_week();
            weeks.push(WeekRow { iso_week, days });
        }
        tracing::debug!(year, month, days = n, offset, rows, "built month grid");
        Ok(MonthGrid {
            year,
            month,
            days_in_month: n,
            offset,
            weeks,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn days_in_month(&self) -> u8 {
        self.days_in_month
    }

    /// Column of the 1st of the month, Monday being 0
    pub fn first_weekday_offset(&self) -> u8 {
        self.offset
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    /// Number of non-padding cells in the Monday through Friday columns
    pub fn workday_count(&self) -> u8 {
        let count = self
            .weeks
            .iter()
            .flat_map(|w| w.iter().take(WEEKEND_COLUMNS[0]))
            .filter(|cell| !cell.is_padding())
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Returns the row and column at which the given day of the month
    /// appears, or `None` if the month has no such day
    pub fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        let index = usize::from(self.offset) + usize::from(day) - 1;
        Some((index / DAYS_IN_WEEK, index % DAYS_IN_WEEK))
    }
}

// Day of the month shown in cell `index` of a grid whose first day is at
// `offset` and which has `n` days
fn day_at(index: usize, offset: u8, n: u8) -> Option<u8> {
    let day = index.checked_sub(usize::from(offset))? + 1;
    u8::try_from(day).ok().filter(|&d| d <= n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::days_in_month;

    fn days_of(week: &WeekRow) -> [Option<u8>; DAYS_IN_WEEK] {
        std::array::from_fn(|i| week.days()[i].day())
    }

    #[test]
    fn test_march_2023() {
        let grid = build_month_grid(2023, 3).unwrap();
        assert_eq!(grid.year(), 2023);
        assert_eq!(grid.month(), 3);
        assert_eq!(grid.days_in_month(), 31);
        assert_eq!(grid.first_weekday_offset(), 2);
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(
            days_of(&weeks[0]),
            [None, None, Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert_eq!(
            days_of(&weeks[1]),
            [Some(6), Some(7), Some(8), Some(9), Some(10), Some(11), Some(12)]
        );
        assert_eq!(
            days_of(&weeks[4]),
            [Some(27), Some(28), Some(29), Some(30), Some(31), None, None]
        );
        let iso_weeks = weeks.iter().map(WeekRow::iso_week).collect::<Vec<_>>();
        assert_eq!(iso_weeks, [9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_weekend_columns() {
        let grid = build_month_grid(2023, 3).unwrap();
        for week in grid.weeks() {
            for (column, cell) in week.iter().enumerate() {
                assert_eq!(cell.is_weekend(), column >= 5, "column {column}");
            }
        }
    }

    #[test]
    fn test_february_2021_fills_four_rows() {
        // Starts on a Monday and has exactly 28 days
        let grid = build_month_grid(2021, 2).unwrap();
        assert_eq!(grid.weeks().len(), 4);
        assert!(grid
            .weeks()
            .iter()
            .all(|w| w.iter().all(|cell| !cell.is_padding())));
        let iso_weeks = grid.weeks().iter().map(WeekRow::iso_week).collect::<Vec<_>>();
        assert_eq!(iso_weeks, [5, 6, 7, 8]);
    }

    #[test]
    fn test_six_rows() {
        // October 2023 starts on a Sunday
        let grid = build_month_grid(2023, 10).unwrap();
        assert_eq!(grid.weeks().len(), 6);
        assert_eq!(
            days_of(&grid.weeks()[0]),
            [None, None, None, None, None, None, Some(1)]
        );
        assert_eq!(
            days_of(&grid.weeks()[5]),
            [Some(30), Some(31), None, None, None, None, None]
        );
    }

    #[test]
    fn test_iso_week_across_year_start() {
        let grid = build_month_grid(2021, 1).unwrap();
        assert_eq!(grid.weeks()[0].iso_week(), 53);
        assert_eq!(grid.weeks()[1].iso_week(), 1);
        let grid = build_month_grid(2024, 12).unwrap();
        let last = grid.weeks().last().unwrap();
        assert_eq!(last.iso_week(), 1);
    }

    #[test]
    fn test_grid_cells_cover_month() {
        for year in [1900, 2000, 2023, 2024] {
            for month in 1..=12 {
                let grid = build_month_grid(year, month).unwrap();
                let days = grid
                    .weeks()
                    .iter()
                    .flat_map(|w| w.iter().filter_map(DayCell::day))
                    .collect::<Vec<_>>();
                let n = days_in_month(year, month).unwrap();
                assert_eq!(days, (1..=n).collect::<Vec<_>>(), "{year}-{month:02}");
                assert!(
                    grid.weeks().iter().all(|w| w.days().len() == DAYS_IN_WEEK),
                    "{year}-{month:02}"
                );
            }
        }
    }

    #[test]
    fn test_workday_count() {
        assert_eq!(workday_count(2023, 3), Ok(23));
        assert_eq!(workday_count(2021, 2), Ok(20));
        assert_eq!(workday_count(2024, 2), Ok(21));
        assert_eq!(workday_count(2023, 10), Ok(22));
    }

    #[test]
    fn test_workday_count_matches_closed_form() {
        for month in 1..=12 {
            let offset = usize::from(crate::first_weekday_offset(2024, month).unwrap());
            let n = usize::from(days_in_month(2024, month).unwrap());
            let expected = (0..n)
                .filter(|i| (offset + i) % DAYS_IN_WEEK < 5)
                .count();
            assert_eq!(
                usize::from(workday_count(2024, month).unwrap()),
                expected,
                "month {month}"
            );
        }
    }

    #[test]
    fn test_position_of() {
        let grid = build_month_grid(2023, 3).unwrap();
        assert_eq!(grid.position_of(1), Some((0, 2)));
        assert_eq!(grid.position_of(5), Some((0, 6)));
        assert_eq!(grid.position_of(6), Some((1, 0)));
        assert_eq!(grid.position_of(31), Some((4, 4)));
        assert_eq!(grid.position_of(0), None);
        assert_eq!(grid.position_of(32), None);
    }

    #[test]
    fn test_invalid_month() {
        assert!(build_month_grid(2023, 13).is_err());
        assert!(build_month_grid(2023, 0).is_err());
        assert!(workday_count(2023, 13).is_err());
    }

    #[test]
    fn test_far_future_year() {
        // Same layout as January 2000, 25 Gregorian cycles earlier
        let grid = build_month_grid(12000, 1).unwrap();
        assert_eq!(grid.first_weekday_offset(), 5);
        let iso_weeks = grid.weeks().iter().map(WeekRow::iso_week).collect::<Vec<_>>();
        assert_eq!(iso_weeks, [52, 1, 2, 3, 4, 5]);
        assert_eq!(workday_count(12000, 1), Ok(21));
        assert_eq!(
            grid.weeks().iter().map(|w| *w.days()).collect::<Vec<_>>(),
            build_month_grid(2000, 1)
                .unwrap()
                .weeks()
                .iter()
                .map(|w| *w.days())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(build_month_grid(2024, 2), build_month_grid(2024, 2));
        assert_eq!(workday_count(2024, 2), workday_count(2024, 2));
    }
}
