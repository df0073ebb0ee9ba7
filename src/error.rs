use std::fmt;
use thiserror::Error;

/// The component of a civil date that an [`InvalidArgument`] error refers to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    Year,
    Month,
    Day,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Year => write!(f, "year"),
            Field::Month => write!(f, "month"),
            Field::Day => write!(f, "day"),
        }
    }
}

/// Error returned when a year, month, or day does not name part of a valid
/// civil date
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("invalid {field}: {value}")]
pub struct InvalidArgument {
    field: Field,
    value: i32,
}

impl InvalidArgument {
    pub(crate) fn new(field: Field, value: i32) -> InvalidArgument {
        tracing::trace!(%field, value, "rejected calendar argument");
        InvalidArgument { field, value }
    }

    pub(crate) fn year(year: i32) -> InvalidArgument {
        InvalidArgument::new(Field::Year, year)
    }

    pub(crate) fn month(month: u8) -> InvalidArgument {
        InvalidArgument::new(Field::Month, month.into())
    }

    pub(crate) fn day(day: u8) -> InvalidArgument {
        InvalidArgument::new(Field::Day, day.into())
    }

    /// The offending field
    pub fn field(&self) -> Field {
        self.field
    }

    /// The offending value
    pub fn value(&self) -> i32 {
        self.value
    }
}
