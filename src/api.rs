use crate::error::PatternError;
use crate::locale::ENGLISH_MONTH_NAMES;
use crate::pattern::{CenturyWindow, PatternCodec, PatternSpec};
use crate::{CalendarDate, ParseOutcome};
use chrono::{Local, NaiveDate};

/// Parsing context.
///
/// Holds what the field knows at parse time, used to fill in fields that
/// partial input leaves out.
#[derive(Debug, Clone)]
pub struct Context {
    /// Date whose fields complete partial input (`"05"` means the 5th of this month).
    /// Today outside tests.
    pub reference_date: NaiveDate,
    /// Zero-based month of the field's current value; used when a typed month
    /// name matches nothing.
    pub fallback_month: Option<u32>,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap_or_default();
            Self { reference_date: date, fallback_month: None }
        } else {
            Self { reference_date: Local::now().date_naive(), fallback_month: None }
        }
    }
}

impl Context {
    /// Default context whose month-name fallback is the month of `value`.
    pub fn for_value(value: Option<&CalendarDate>) -> Self {
        Self { fallback_month: value.map(|value| value.month), ..Self::default() }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Window for short years without an explicit suffix, and for locales that
    /// render two-digit years.
    pub default_century: CenturyWindow,
    /// Locale used when the requested one is not supported.
    pub fallback_locale: String,
}

impl Default for Options {
    fn default() -> Self {
        Options { default_century: CenturyWindow::default(), fallback_locale: "en_US".to_string() }
    }
}

/// Compile a display pattern with the default century window.
///
/// # Example
/// ```
/// use datepat::{Layout, compile};
///
/// let spec = compile("-0d0M0y").unwrap();
/// assert_eq!(spec.layout(), Layout::Separated);
/// ```
pub fn compile(raw: &str) -> Result<PatternSpec, PatternError> {
    PatternSpec::compile(raw)
}

fn english_codec(raw: &str) -> Result<PatternCodec, PatternError> {
    let names = ENGLISH_MONTH_NAMES.iter().map(|name| name.to_string()).collect();
    Ok(PatternCodec::new(compile(raw)?, names))
}

/// Format `date` with `raw`; month names are English.
///
/// # Example
/// ```
/// use datepat::{CalendarDate, format_with_pattern};
///
/// let text = format_with_pattern("-0d0M0y", &CalendarDate::new(2024, 2, 5)).unwrap();
/// assert_eq!(text, "05-03-24");
/// ```
pub fn format_with_pattern(raw: &str, date: &CalendarDate) -> Result<String, PatternError> {
    Ok(english_codec(raw)?.format(date))
}

/// Parse `text` with `raw`; month names are English.
///
/// A malformed pattern is an error; text that does not fit the pattern is
/// [`ParseOutcome::Invalid`].
pub fn parse_with_pattern(raw: &str, text: &str, context: &Context) -> Result<ParseOutcome, PatternError> {
    Ok(english_codec(raw)?.parse(text, context))
}
