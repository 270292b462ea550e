//! Error types.
//!
//! Only pattern compilation and locale lookup can fail. Parsing user input
//! never fails with an error; see [`crate::ParseOutcome::Invalid`].

use crate::pattern::DateField;

/// A display pattern that does not follow the pattern grammar.
///
/// Returned by [`crate::compile`] and by
/// [`crate::DatePatternController::set_display_pattern`]; in the latter case the
/// previously active mode stays in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("date pattern is empty")]
    Empty,

    #[error("date pattern `{pattern}` has length {length}, expected 6, 7, 11 or 12 characters")]
    InvalidLength { pattern: String, length: usize },

    #[error("unrecognized field token `{token}` in date pattern `{pattern}`")]
    UnknownToken { pattern: String, token: String },

    /// A field token repeats; with three slots this also means another field is missing.
    #[error("{field} appears more than once in date pattern `{pattern}`")]
    DuplicateField { pattern: String, field: DateField },

    #[error("separator `{separator}` in date pattern `{pattern}` clashes with field content")]
    InvalidSeparator { pattern: String, separator: char },

    #[error("malformed century suffix `{suffix}` in date pattern `{pattern}`")]
    MalformedCentury { pattern: String, suffix: String },

    #[error("date pattern `{pattern}` has a century suffix but no short year field")]
    CenturyWithoutShortYear { pattern: String },
}

/// A locale the renderer does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("unsupported locale `{0}`")]
    Unsupported(String),
}
