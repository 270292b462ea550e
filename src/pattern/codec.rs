//! Pattern-driven formatting and parsing.
//!
//! The codec reads text leniently: partial input is accepted and missing
//! fields are taken from the [`Context`]. What it reads depends on the layout.
//!
//! ```text
//! Separated  "05-03"       split on sep ─▶ 3 parts: every field by slot
//!                                          2 parts: day + month, in pattern order
//!                                          1 part:  day only
//!
//! Packed     "0503"        len <= 2  ─▶ day only
//!                          len 3..=4 ─▶ day + month, in pattern order
//!                          len > 4   ─▶ every field, fixed widths (2, or 4 for `_y`);
//!                                       a `0y` field takes 4 when the text is 2 longer
//!
//!            "05Mar24"     with `mM`: fields consumed left to right, the month
//!                          name taking the run of letters at its slot
//! ```
//!
//! Month names match on a case-insensitive prefix; an unknown name never fails
//! the parse but falls back to the field's current month.

use super::century::CenturyWindow;
use super::spec::{DateField, DayStyle, Layout, MonthStyle, PatternSpec, YearStyle};
use crate::{CalendarDate, Context, ParseOutcome};
use chrono::Datelike;
use tracing::debug;

/// Format/parse pair compiled from a [`PatternSpec`].
#[derive(Debug, Clone)]
pub struct PatternCodec {
    spec: PatternSpec,
    month_names: Vec<String>,
    lowercase_names: Vec<String>,
}

impl PatternCodec {
    /// `month_names` are only consulted for `mM` patterns, January first.
    pub fn new(spec: PatternSpec, month_names: Vec<String>) -> Self {
        let lowercase_names = month_names.iter().map(|name| name.to_lowercase()).collect();
        PatternCodec { spec, month_names, lowercase_names }
    }

    pub fn spec(&self) -> &PatternSpec {
        &self.spec
    }

    pub fn month_names(&self) -> &[String] {
        &self.month_names
    }

    // --- Formatting ------------------------------------------------------------

    pub fn format(&self, date: &CalendarDate) -> String {
        let parts = self.spec.field_order().map(|field| self.format_field(field, date));
        match self.spec.separator() {
            Some(separator) => parts.join(separator.to_string().as_str()),
            None => parts.concat(),
        }
    }

    /// Like [`format`](Self::format), but an absent date renders as empty text.
    pub fn format_opt(&self, date: Option<&CalendarDate>) -> String {
        date.map(|date| self.format(date)).unwrap_or_default()
    }

    fn format_field(&self, field: DateField, date: &CalendarDate) -> String {
        match field {
            // Packed text is sliced by width, so numbers there always take their full width.
            DateField::Day => match (self.spec.day_style(), self.spec.layout()) {
                (DayStyle::Bare, Layout::Separated) => date.day.to_string(),
                _ => format!("{:02}", date.day),
            },
            DateField::Month => match (self.spec.month_style(), self.spec.layout()) {
                (MonthStyle::Name, _) => self.month_names.get(date.month as usize).cloned().unwrap_or_default(),
                (MonthStyle::Bare, Layout::Separated) => date.month.saturating_add(1).to_string(),
                _ => format!("{:02}", date.month.saturating_add(1)),
            },
            DateField::Year => match (self.spec.year_style(), self.spec.layout()) {
                (YearStyle::Short, _) => CenturyWindow::shorten(date.year),
                (YearStyle::Full, Layout::Packed) => format!("{:04}", date.year),
                (YearStyle::Full, Layout::Separated) => date.year.to_string(),
            },
        }
    }

    // --- Parsing ---------------------------------------------------------------

    pub fn parse(&self, text: &str, context: &Context) -> ParseOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ParseOutcome::Empty;
        }

        let segments = match self.spec.layout() {
            Layout::Separated => self.split_segments(text),
            Layout::Packed if self.spec.uses_month_names() => self.walk_segments(text),
            Layout::Packed => self.slice_segments(text),
        };

        match segments.and_then(|segments| self.assemble(&segments, context)) {
            Some(date) => ParseOutcome::Parsed(date),
            None => ParseOutcome::Invalid,
        }
    }

    fn split_segments<'t>(&self, text: &'t str) -> Option<Vec<(DateField, &'t str)>> {
        let separator = self.spec.separator()?;
        let parts: Vec<&str> = text.split(separator).map(str::trim).collect();

        match parts.as_slice() {
            [a, b, c] => Some(self.spec.field_order().into_iter().zip([*a, *b, *c]).collect()),
            [first, second] => {
                let day_first = self.spec.position(DateField::Day) < self.spec.position(DateField::Month);
                if day_first {
                    Some(vec![(DateField::Day, *first), (DateField::Month, *second)])
                } else {
                    Some(vec![(DateField::Month, *first), (DateField::Day, *second)])
                }
            }
            [day] => Some(vec![(DateField::Day, *day)]),
            _ => None,
        }
    }

    fn slice_segments<'t>(&self, text: &'t str) -> Option<Vec<(DateField, &'t str)>> {
        // Widths are counted in bytes below.
        if !text.is_ascii() {
            return None;
        }

        let fields: Vec<DateField> = match text.len() {
            0..=2 => return Some(vec![(DateField::Day, text)]),
            3..=4 => self.spec.field_order().into_iter().filter(|field| *field != DateField::Year).collect(),
            _ => self.spec.field_order().to_vec(),
        };

        // A full year typed into a short-year pattern is two digits longer than the pattern.
        let full_year_typed = self.spec.year_style() == YearStyle::Short && text.len() == self.packed_width() + 2;

        let mut segments = Vec::with_capacity(fields.len());
        let mut offset = 0;
        for field in fields {
            let width = match field {
                DateField::Year if full_year_typed => 4,
                _ => self.width(field),
            };
            let end = (offset + width).min(text.len());
            segments.push((field, &text[offset..end]));
            offset = end;
        }

        (offset == text.len()).then_some(segments)
    }

    fn walk_segments<'t>(&self, text: &'t str) -> Option<Vec<(DateField, &'t str)>> {
        let mut segments = Vec::with_capacity(3);
        let mut rest = text;

        for field in self.spec.field_order() {
            if rest.is_empty() {
                break;
            }
            let taken = match field {
                DateField::Month => rest.find(|c: char| !c.is_alphabetic()).unwrap_or(rest.len()),
                _ => rest.chars().take(self.width(field)).take_while(char::is_ascii_digit).count(),
            };
            let (head, tail) = rest.split_at(taken);
            if !(field == DateField::Month && head.is_empty()) {
                segments.push((field, head));
            }
            rest = tail;
        }

        rest.is_empty().then_some(segments)
    }

    fn width(&self, field: DateField) -> usize {
        match (field, self.spec.year_style()) {
            (DateField::Year, YearStyle::Full) => 4,
            _ => 2,
        }
    }

    fn packed_width(&self) -> usize {
        self.spec.field_order().into_iter().map(|field| self.width(field)).sum()
    }

    fn assemble(&self, segments: &[(DateField, &str)], context: &Context) -> Option<CalendarDate> {
        let mut date = CalendarDate::from(context.reference_date);

        for (field, raw) in segments {
            match field {
                DateField::Day => date.day = read_number(raw)?,
                DateField::Month => date.month = self.read_month(raw, context)?,
                DateField::Year => date.year = self.read_year(raw)?,
            }
        }

        Some(date)
    }

    fn read_month(&self, raw: &str, context: &Context) -> Option<u32> {
        match self.spec.month_style() {
            MonthStyle::Name => Some(self.resolve_month_name(raw, context)),
            MonthStyle::ZeroPadded | MonthStyle::Bare => CalendarDate::month_from_number(read_number(raw)?),
        }
    }

    fn read_year(&self, raw: &str) -> Option<i32> {
        let year = read_number::<i32>(raw)?;
        Some(match self.spec.century() {
            Some(window) => window.resolve(year),
            None => year,
        })
    }

    /// Zero-based index of the first month whose name starts with `candidate`.
    fn resolve_month_name(&self, candidate: &str, context: &Context) -> u32 {
        let candidate = candidate.to_lowercase();
        let found = (!candidate.is_empty())
            .then(|| self.lowercase_names.iter().position(|name| name.starts_with(&candidate)))
            .flatten();

        match found {
            Some(index) => index as u32,
            None => {
                let month = context.fallback_month.unwrap_or_else(|| context.reference_date.month0());
                debug!(candidate = %candidate, fallback = month, "no month name matches, keeping current month");
                month
            }
        }
    }
}

fn read_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
