use crate::error::InvalidArgument;
use std::fmt;
use time::{Date, Month};

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar
pub fn is_leap_year(year: i32) -> bool {
    time::util::is_leap_year(year)
}

/// Returns the number of days in the given month of the given year.
///
/// # Errors
///
/// Fails if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, InvalidArgument> {
    to_month(month).map(|m| month_length(year, m))
}

/// Returns the weekday of the first day of the given month as an offset from
/// Monday, so that Monday is 0 and Sunday is 6.
///
/// # Errors
///
/// Fails if `month` is not in `1..=12`.
pub fn first_weekday_offset(year: i32, month: u8) -> Result<u8, InvalidArgument> {
    CivilDate::new(year, month, 1).map(|d| d.weekday_offset())
}

/// Returns the number of days from January 1st of `year` to the given date,
/// so that January 1st itself yields 0.
///
/// # Errors
///
/// Fails if the year, month, and day do not form a valid date.
pub fn days_since_january_first(year: i32, month: u8, day: u8) -> Result<u16, InvalidArgument> {
    CivilDate::new(year, month, day).map(|d| d.days_since_january_first())
}

pub(crate) fn to_month(month: u8) -> Result<Month, InvalidArgument> {
    Month::try_from(month).map_err(|_| InvalidArgument::month(month))
}

pub(crate) fn month_length(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
    }
}

/// Days in a common year before the 1st of each month
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// Weekday of January 1st of `year`, Monday being 0
fn new_year_offset(year: i32) -> u8 {
    let y = i64::from(year) - 1;
    // Gauss's algorithm gives 0 for Sunday
    let sunday_based =
        (1 + 5 * y.rem_euclid(4) + 4 * y.rem_euclid(100) + 6 * y.rem_euclid(400)).rem_euclid(7);
    // Always in 0..7
    u8::try_from((sunday_based + 6) % 7).unwrap_or_default()
}

// Number of ISO weeks in the week-based year `year`
fn iso_weeks_in_year(year: i32) -> u8 {
    match new_year_offset(year) {
        3 => 53,
        2 if is_leap_year(year) => 53,
        _ => 52,
    }
}

/// A year, month, and day in the proleptic Gregorian calendar.
///
/// Every `i32` year is accepted; weekdays and week numbers are computed
/// directly from the calendar rules rather than through [`time::Date`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CivilDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CivilDate {
    /// # Errors
    ///
    /// Fails if the month is not in `1..=12` or if the day does not exist in
    /// that month.
    pub fn new(year: i32, month: u8, day: u8) -> Result<CivilDate, InvalidArgument> {
        let m = to_month(month)?;
        if day == 0 || day > month_length(year, m) {
            return Err(InvalidArgument::day(day));
        }
        Ok(CivilDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Monday is 0, Sunday is 6
    pub fn weekday_offset(&self) -> u8 {
        let ordinal = u32::from(self.days_since_january_first());
        let offset = (u32::from(new_year_offset(self.year)) + ordinal) % 7;
        u8::try_from(offset).unwrap_or_default()
    }

    /// ISO 8601 week of the week-based year
    pub fn iso_week(&self) -> u8 {
        // 1-based ordinal minus 1-based ISO weekday, shifted so that the week
        // holding the year's first Thursday is week 1
        let ordinal = i32::from(self.days_since_january_first()) + 1;
        let weekday = i32::from(self.weekday_offset()) + 1;
        let week = (ordinal - weekday + 10) / 7;
        if week < 1 {
            iso_weeks_in_year(self.year.saturating_sub(1))
        } else if week > i32::from(iso_weeks_in_year(self.year)) {
            1
        } else {
            u8::try_from(week).unwrap_or_default()
        }
    }

    pub fn days_since_january_first(&self) -> u16 {
        let index = usize::from(self.month - 1);
        let leap_day = u16::from(self.month > 2 && is_leap_year(self.year));
        DAYS_BEFORE_MONTH[index] + leap_day + u16::from(self.day) - 1
    }
}

impl From<Date> for CivilDate {
    fn from(date: Date) -> CivilDate {
        CivilDate {
            year: date.year(),
            month: date.month().into(),
            day: date.day(),
        }
    }
}

impl TryFrom<CivilDate> for Date {
    type Error = InvalidArgument;

    /// Fails if the year lies outside the range of [`time::Date`]
    fn try_from(date: CivilDate) -> Result<Date, InvalidArgument> {
        Date::from_calendar_date(date.year, to_month(date.month)?, date.day)
            .map_err(|_| InvalidArgument::year(date.year))
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use time::macros::date;

    const SAMPLE_YEARS: [i32; 10] = [1, 1600, 1900, 1970, 2000, 2023, 2024, 2100, 2400, 9999];

    #[test]
    fn test_days_in_february() {
        assert_eq!(days_in_month(2024, 2), Ok(29));
        assert_eq!(days_in_month(2023, 2), Ok(28));
        assert_eq!(days_in_month(2000, 2), Ok(29));
        assert_eq!(days_in_month(1900, 2), Ok(28));
    }

    #[test]
    fn test_days_in_month_range() {
        for year in SAMPLE_YEARS {
            for month in 1..=12 {
                let n = days_in_month(year, month).unwrap();
                assert!((28..=31).contains(&n), "{year}-{month:02} has {n} days");
                if month == 2 {
                    assert_eq!(n == 29, is_leap_year(year), "February {year}");
                }
            }
        }
    }

    #[test]
    fn test_year_length() {
        for year in SAMPLE_YEARS {
            let total = (1..=12)
                .map(|m| u16::from(days_in_month(year, m).unwrap()))
                .sum::<u16>();
            let expected = if is_leap_year(year) { 366 } else { 365 };
            assert_eq!(total, expected, "length of {year}");
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_days_in_month_bad_month() {
        let e = days_in_month(2023, 13).unwrap_err();
        assert_eq!(e.field(), Field::Month);
        assert_eq!(e.value(), 13);
        let e = days_in_month(2023, 0).unwrap_err();
        assert_eq!(e.field(), Field::Month);
        assert_eq!(e.value(), 0);
    }

    #[test]
    fn test_first_weekday_offset() {
        // Wednesday
        assert_eq!(first_weekday_offset(2023, 3), Ok(2));
        // Monday
        assert_eq!(first_weekday_offset(2024, 1), Ok(0));
        // Sunday
        assert_eq!(first_weekday_offset(2023, 1), Ok(6));
        // Thursday
        assert_eq!(first_weekday_offset(2024, 2), Ok(3));
    }

    #[test]
    fn test_first_weekday_offset_in_range() {
        for year in SAMPLE_YEARS {
            for month in 1..=12 {
                let offset = first_weekday_offset(year, month).unwrap();
                assert!(offset <= 6, "{year}-{month:02} starts at offset {offset}");
            }
        }
    }

    #[test]
    fn test_first_weekday_offset_errors() {
        assert_eq!(
            first_weekday_offset(2023, 13).map_err(|e| e.field()),
            Err(Field::Month)
        );
    }

    #[test]
    fn test_days_since_january_first() {
        assert_eq!(days_since_january_first(2024, 1, 1), Ok(0));
        assert_eq!(days_since_january_first(2024, 3, 1), Ok(60));
        assert_eq!(days_since_january_first(2023, 3, 1), Ok(59));
        assert_eq!(days_since_january_first(2023, 2, 15), Ok(45));
        assert_eq!(days_since_january_first(2023, 12, 31), Ok(364));
        assert_eq!(days_since_january_first(2024, 12, 31), Ok(365));
    }

    #[test]
    fn test_days_since_january_first_invalid() {
        let e = days_since_january_first(2023, 2, 29).unwrap_err();
        assert_eq!(e.field(), Field::Day);
        assert_eq!(e.value(), 29);
        assert_eq!(
            days_since_january_first(2023, 4, 31).map_err(|e| e.field()),
            Err(Field::Day)
        );
        assert_eq!(
            days_since_january_first(2023, 1, 0).map_err(|e| e.field()),
            Err(Field::Day)
        );
        assert_eq!(
            days_since_january_first(2023, 13, 1).map_err(|e| e.field()),
            Err(Field::Month)
        );
        assert!(days_since_january_first(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(days_in_month(2023, 4), days_in_month(2023, 4));
        assert_eq!(first_weekday_offset(2023, 4), first_weekday_offset(2023, 4));
        assert_eq!(
            days_since_january_first(2023, 4, 9),
            days_since_january_first(2023, 4, 9)
        );
    }

    #[test]
    fn test_civil_date() {
        let d = CivilDate::new(2024, 3, 1).unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 3);
        assert_eq!(d.day(), 1);
        assert_eq!(d.weekday_offset(), 4);
        assert_eq!(d.iso_week(), 9);
        assert_eq!(d.to_string(), "2024-03-01");
        assert_eq!(Date::try_from(d), Ok(date!(2024 - 03 - 01)));
        assert_eq!(CivilDate::from(date!(2024 - 03 - 01)), d);
    }

    #[test]
    fn test_iso_week_year_boundaries() {
        // Belongs to week 53 of 2020
        assert_eq!(CivilDate::new(2021, 1, 1).unwrap().iso_week(), 53);
        // Belongs to week 1 of 2025
        assert_eq!(CivilDate::new(2024, 12, 30).unwrap().iso_week(), 1);
        assert_eq!(CivilDate::new(2023, 1, 1).unwrap().iso_week(), 52);
        assert_eq!(CivilDate::new(2023, 1, 2).unwrap().iso_week(), 1);
    }

    #[test]
    fn test_negative_year_display() {
        assert_eq!(CivilDate::new(-44, 3, 15).unwrap().to_string(), "-0044-03-15");
        assert_eq!(CivilDate::new(12345, 1, 2).unwrap().to_string(), "12345-01-02");
    }

    #[test]
    fn test_agrees_with_time() {
        for year in [-9999, -401, -44, -1, 0, 1, 1582, 1900, 1999, 2000, 2020, 2024, 9999] {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month).unwrap() {
                    let d = CivilDate::new(year, month, day).unwrap();
                    let expected = Date::try_from(d).unwrap();
                    assert_eq!(CivilDate::from(expected), d);
                    assert_eq!(
                        d.weekday_offset(),
                        expected.weekday().number_days_from_monday(),
                        "weekday of {d}"
                    );
                    assert_eq!(d.iso_week(), expected.iso_week(), "week of {d}");
                    assert_eq!(
                        d.days_since_january_first(),
                        expected.ordinal() - 1,
                        "ordinal of {d}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_years_beyond_9999() {
        // The Gregorian calendar repeats every 400 years, so 10000 and 12000
        // fall on the same weekdays as 2000
        assert!(is_leap_year(10000));
        assert_eq!(first_weekday_offset(10000, 1), Ok(5));
        assert_eq!(first_weekday_offset(10000, 3), Ok(2));
        assert_eq!(days_since_january_first(10000, 3, 1), Ok(60));
        assert_eq!(days_since_january_first(10000, 12, 31), Ok(365));
        let d = CivilDate::new(12000, 1, 1).unwrap();
        assert_eq!(d.weekday_offset(), 5);
        assert_eq!(d.iso_week(), 52);
        assert!(CivilDate::new(i32::MAX, 12, 31).is_ok());
        assert!(CivilDate::new(i32::MIN, 1, 1).is_ok());
        assert_eq!(
            Date::try_from(d).map_err(|e| e.field()),
            Err(Field::Year)
        );
    }
}
