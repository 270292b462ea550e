extern crate self as datepat;

#[macro_use]
mod macros;
mod api;
mod controller;
mod error;
mod locale;
mod pattern;
mod remote;

#[cfg(test)]
mod testing;

pub use api::{Context, Options, compile, format_with_pattern, parse_with_pattern};
pub use controller::{DatePatternController, Field, Mode, SERVER_SIDE_PATTERN};
pub use error::{LocaleError, PatternError};
pub use locale::{
    ChronoLocales, ChronoRenderer, ENGLISH_MONTH_NAMES, IsoRenderer, LocaleDateDetector, LocaleRenderer, RendererProvider,
    tag_candidates,
};
pub use pattern::{
    CenturyWindow, DateField, DayStyle, DisplayOrder, FieldSet, Layout, MonthStyle, PatternCodec, PatternSpec,
    SimpleDatePattern, YearStyle, presets,
};
pub use remote::{RemoteBinding, RemoteDateAuthority, RemoteDelegationAdapter, Role};

use chrono::{Datelike, NaiveDate};
use std::fmt;

// --- Core value types -------------------------------------------------------

/// A plain calendar date as exchanged with the host field.
///
/// `month` is zero based (`0` is January). No day-in-month validation happens
/// here; that is the field's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        CalendarDate { day, month, year }
    }

    /// Convert to a chrono date, if the triple names a real day.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.checked_add(1)?, self.day)
    }

    /// Zero-based month for a typed one-based month number, `None` outside `1..=12`.
    pub fn month_from_number(number: u32) -> Option<u32> {
        (1..=12).contains(&number).then(|| number - 1)
    }

    /// Render as `YYYY-MM-DD` with a one-based month, without validation.
    pub fn to_iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month.saturating_add(1), self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate { day: date.day(), month: date.month0(), year: date.year() }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

/// What a parse hook hands back to the field.
///
/// A failed parse is a value, not an error: the field keeps the raw text and
/// marks itself invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The text described this date.
    Parsed(CalendarDate),
    /// Nothing to parse (blank input).
    Empty,
    /// The answer arrives later through a remote completion.
    Pending,
    /// The text does not have the shape the active codec expects.
    Invalid,
}

impl ParseOutcome {
    /// The parsed date, if any.
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            ParseOutcome::Parsed(date) => Some(date),
            _ => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, ParseOutcome::Invalid)
    }
}
