//! Locale layout detection.
//!
//! A locale's field order and separators are recovered from one rendering of
//! a sentinel date whose parts are all distinct (22 November 1987):
//!
//! ```text
//!  en_US  "11/22/1987"  ─▶  ^(\d{1,2})/(\d{1,2})/(\d{1,4})$   month, day, year
//!  de_DE  "22.11.1987"  ─▶  ^(\d{1,2})\.(\d{1,2})\.(\d{1,4})$ day, month, year
//!  short  "22/11/87"    ─▶  ^(\d{1,2})/(\d{1,2})/(\d{1,2})$   day, month, short year
//! ```
//!
//! Non-ASCII characters (direction marks, CJK unit suffixes) are dropped from
//! both the rendering and the parsed text.

use super::renderer::{IsoRenderer, LocaleRenderer, RendererProvider};
use crate::pattern::{CenturyWindow, DateField};
use crate::{CalendarDate, Options, ParseOutcome};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use tracing::{debug, warn};

const SENTINEL: (i32, u32, u32) = (1987, 11, 22);

#[derive(Debug, Clone)]
struct DetectedLayout {
    regex: Regex,
    order: [DateField; 3],
    /// Set when the locale renders two-digit years.
    short_year: Option<CenturyWindow>,
}

/// Format/parse pair derived from a locale's native rendering.
pub struct LocaleDateDetector {
    renderer: Box<dyn LocaleRenderer>,
    layout: Option<DetectedLayout>,
    month_names: Vec<String>,
}

impl fmt::Debug for LocaleDateDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleDateDetector")
            .field("locale", &self.renderer.tag())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl LocaleDateDetector {
    /// Detector for `tag`, falling back to `options.fallback_locale` (and at
    /// last to ISO rendering) when the provider does not know it.
    pub fn for_locale(provider: &dyn RendererProvider, tag: &str, options: &Options) -> Self {
        let renderer = match provider.renderer_for(tag) {
            Ok(renderer) => renderer,
            Err(err) => {
                warn!(error = %err, fallback = %options.fallback_locale, "falling back to default locale");
                provider.renderer_for(&options.fallback_locale).unwrap_or_else(|err| {
                    warn!(error = %err, "fallback locale unavailable, rendering ISO dates");
                    Box::new(IsoRenderer)
                })
            }
        };
        Self::with_renderer(renderer, options.default_century)
    }

    /// `century` resolves years of locales that render only two digits.
    pub fn with_renderer(renderer: Box<dyn LocaleRenderer>, century: CenturyWindow) -> Self {
        let layout = detect(renderer.as_ref(), century);
        match &layout {
            Some(layout) => debug!(locale = renderer.tag(), regex = %layout.regex, "detected locale date layout"),
            None => warn!(locale = renderer.tag(), "could not locate date fields in locale rendering, parsing disabled"),
        }
        let month_names = renderer.month_names();
        LocaleDateDetector { renderer, layout, month_names }
    }

    pub fn locale(&self) -> &str {
        self.renderer.tag()
    }

    /// Whether the sentinel date could be taken apart.
    pub fn is_detected(&self) -> bool {
        self.layout.is_some()
    }

    pub fn field_order(&self) -> Option<[DateField; 3]> {
        self.layout.as_ref().map(|layout| layout.order)
    }

    /// The generated parse regex, for diagnostics.
    pub fn regex(&self) -> Option<&str> {
        self.layout.as_ref().map(|layout| layout.regex.as_str())
    }

    pub fn month_names(&self) -> &[String] {
        &self.month_names
    }

    /// Native rendering of `date` at noon. Dates chrono cannot represent
    /// render as empty text.
    pub fn format(&self, date: &CalendarDate) -> String {
        date.to_naive()
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .map(|at| ascii_only(&self.renderer.render(at)))
            .unwrap_or_default()
    }

    pub fn format_opt(&self, date: Option<&CalendarDate>) -> String {
        date.map(|date| self.format(date)).unwrap_or_default()
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        let text = ascii_only(text);
        let text = text.trim();
        if text.is_empty() {
            return ParseOutcome::Empty;
        }
        let Some(layout) = &self.layout else {
            return ParseOutcome::Invalid;
        };
        let Some(caps) = layout.regex.captures(text) else {
            return ParseOutcome::Invalid;
        };

        let mut date = CalendarDate::new(0, 0, 1);
        for (slot, field) in layout.order.into_iter().enumerate() {
            let raw = caps.get(slot + 1).map_or("", |m| m.as_str());
            let read = match field {
                DateField::Day => raw.parse().ok().map(|day| date.day = day),
                DateField::Month => {
                    raw.parse().ok().and_then(CalendarDate::month_from_number).map(|month| date.month = month)
                }
                DateField::Year => raw.parse::<i32>().ok().map(|year| {
                    date.year = layout.short_year.map_or(year, |window| window.resolve(year));
                }),
            };
            if read.is_none() {
                return ParseOutcome::Invalid;
            }
        }

        ParseOutcome::Parsed(date)
    }
}

fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn detect(renderer: &dyn LocaleRenderer, century: CenturyWindow) -> Option<DetectedLayout> {
    let (year, month, day) = SENTINEL;
    let at = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(12, 0, 0)?;
    let rendered = ascii_only(&renderer.render(at));

    let mut taken: Vec<Range<usize>> = Vec::with_capacity(3);
    let (year_at, short_year) = match find_free(&rendered, &year.to_string(), &taken) {
        Some(range) => (range, None),
        None => (find_free(&rendered, &CenturyWindow::shorten(year), &taken)?, Some(century)),
    };
    taken.push(year_at.clone());
    let month_at = find_free(&rendered, &month.to_string(), &taken)?;
    taken.push(month_at.clone());
    let day_at = find_free(&rendered, &day.to_string(), &taken)?;

    let mut fields = [(day_at, DateField::Day), (month_at, DateField::Month), (year_at, DateField::Year)];
    fields.sort_by_key(|(range, _)| range.start);

    let mut pattern = String::from("^");
    let mut cursor = 0;
    for (range, field) in &fields {
        pattern.push_str(&regex::escape(&rendered[cursor..range.start]));
        pattern.push_str(match field {
            DateField::Year if short_year.is_none() => r"(\d{1,4})",
            _ => r"(\d{1,2})",
        });
        cursor = range.end;
    }
    pattern.push_str(&regex::escape(&rendered[cursor..]));
    pattern.push('$');

    let regex = Regex::new(&pattern).ok()?;
    Some(DetectedLayout { regex, order: fields.map(|(_, field)| field), short_year })
}

/// First occurrence of `needle` not overlapping any of `taken`.
fn find_free(haystack: &str, needle: &str, taken: &[Range<usize>]) -> Option<Range<usize>> {
    haystack
        .match_indices(needle)
        .map(|(start, _)| start..start + needle.len())
        .find(|range| taken.iter().all(|t| range.end <= t.start || range.start >= t.end))
}
