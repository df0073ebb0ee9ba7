//! Calendar arithmetic for rendering a single month.
//!
//! Everything here is a pure function of a year, month, and (where relevant)
//! day in the proleptic Gregorian calendar: the length of a month, the weekday
//! of its first day, a Monday-first grid of its weeks tagged with ISO 8601
//! week numbers, its number of workdays, and how far into the year a date
//! falls.  Invalid input is reported as an [`InvalidArgument`] naming the
//! offending field.
//!
//! ```
//! let grid = calgrid::build_month_grid(2023, 3)?;
//! assert_eq!(grid.weeks()[0].iso_week(), 9);
//! assert_eq!(calgrid::workday_count(2023, 3)?, 23);
//! assert_eq!(calgrid::days_since_january_first(2024, 3, 1)?, 60);
//! # Ok::<(), calgrid::InvalidArgument>(())
//! ```
mod civil;
mod error;
mod grid;
pub use crate::civil::{
    days_in_month, days_since_january_first, first_weekday_offset, is_leap_year, CivilDate,
};
pub use crate::error::{Field, InvalidArgument};
pub use crate::grid::{build_month_grid, workday_count, DayCell, MonthGrid, WeekRow, DAYS_IN_WEEK};
