//! Pattern grammar and compiler.
//!
//! `PatternSpec::compile` is the only way to obtain a spec; once built it is
//! never mutated. A new pattern string always produces a new spec.

use super::century::CenturyWindow;
use crate::error::PatternError;
use std::fmt;
use std::str::FromStr;

/// One of the three parts of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Day,
    Month,
    Year,
}

impl DateField {
    pub const fn flag(self) -> FieldSet {
        match self {
            DateField::Day => FieldSet::DAY,
            DateField::Month => FieldSet::MONTH,
            DateField::Year => FieldSet::YEAR,
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateField::Day => "day",
            DateField::Month => "month",
            DateField::Year => "year",
        })
    }
}

bitflags::bitflags! {
    /// A set of date fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u8 {
        const DAY   = 1 << 0;
        const MONTH = 1 << 1;
        const YEAR  = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStyle {
    /// `0d`: `05`
    ZeroPadded,
    /// `_d`: `5`
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthStyle {
    /// `0M`: `03`
    ZeroPadded,
    /// `_M`: `3`
    Bare,
    /// `mM`: localized month name
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearStyle {
    /// `0y`: last two digits
    Short,
    /// `_y`: every digit
    Full,
}

/// How fields are laid out in text, decided by the raw pattern length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// 7 or 12 characters: fields joined by a separator.
    Separated,
    /// 6 or 11 characters: fixed-width fields written back to back.
    Packed,
}

enum FieldToken {
    Day(DayStyle),
    Month(MonthStyle),
    Year(YearStyle),
}

impl FieldToken {
    fn read(pair: &[char]) -> Option<Self> {
        Some(match pair {
            ['0', 'd'] => FieldToken::Day(DayStyle::ZeroPadded),
            ['_', 'd'] => FieldToken::Day(DayStyle::Bare),
            ['0', 'M'] => FieldToken::Month(MonthStyle::ZeroPadded),
            ['_', 'M'] => FieldToken::Month(MonthStyle::Bare),
            ['m', 'M'] => FieldToken::Month(MonthStyle::Name),
            ['0', 'y'] => FieldToken::Year(YearStyle::Short),
            ['_', 'y'] => FieldToken::Year(YearStyle::Full),
            _ => return None,
        })
    }

    fn field(&self) -> DateField {
        match self {
            FieldToken::Day(_) => DateField::Day,
            FieldToken::Month(_) => DateField::Month,
            FieldToken::Year(_) => DateField::Year,
        }
    }
}

/// A compiled display pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    raw: String,
    layout: Layout,
    separator: Option<char>,
    field_order: [DateField; 3],
    day_style: DayStyle,
    month_style: MonthStyle,
    year_style: YearStyle,
    century: Option<CenturyWindow>,
}

impl PatternSpec {
    /// Compile `raw` using the default century window for short years
    /// without an explicit suffix.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        Self::compile_with(raw, CenturyWindow::default())
    }

    /// Compile `raw`; `default_century` applies when a short year carries no suffix.
    pub fn compile_with(raw: &str, default_century: CenturyWindow) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }

        let chars: Vec<char> = raw.chars().collect();
        let (layout, separator, body) = match chars.len() {
            7 | 12 => (Layout::Separated, Some(chars[0]), &chars[1..]),
            6 | 11 => (Layout::Packed, None, &chars[..]),
            length => return Err(PatternError::InvalidLength { pattern: raw.to_string(), length }),
        };
        let (tokens, suffix) = body.split_at(6);

        let mut seen = FieldSet::empty();
        let mut field_order = [DateField::Day, DateField::Month, DateField::Year];
        let mut day_style = DayStyle::ZeroPadded;
        let mut month_style = MonthStyle::ZeroPadded;
        let mut year_style = YearStyle::Full;

        // Three slots and no repeats means every field is present afterwards.
        for (slot, pair) in tokens.chunks(2).enumerate() {
            let token = FieldToken::read(pair).ok_or_else(|| PatternError::UnknownToken {
                pattern: raw.to_string(),
                token: pair.iter().collect(),
            })?;
            let field = token.field();
            if seen.contains(field.flag()) {
                return Err(PatternError::DuplicateField { pattern: raw.to_string(), field });
            }
            seen |= field.flag();
            field_order[slot] = field;

            match token {
                FieldToken::Day(style) => day_style = style,
                FieldToken::Month(style) => month_style = style,
                FieldToken::Year(style) => year_style = style,
            }
        }

        if let Some(separator) = separator {
            let clashes = separator.is_ascii_digit() || (month_style == MonthStyle::Name && separator.is_alphabetic());
            if clashes {
                return Err(PatternError::InvalidSeparator { pattern: raw.to_string(), separator });
            }
        }

        let century = match (year_style, suffix.is_empty()) {
            (YearStyle::Short, true) => Some(default_century),
            (YearStyle::Short, false) => Some(CenturyWindow::from_suffix(suffix).ok_or_else(|| {
                PatternError::MalformedCentury { pattern: raw.to_string(), suffix: suffix.iter().collect() }
            })?),
            (YearStyle::Full, true) => None,
            (YearStyle::Full, false) => {
                return Err(PatternError::CenturyWithoutShortYear { pattern: raw.to_string() });
            }
        };

        Ok(PatternSpec {
            raw: raw.to_string(),
            layout,
            separator,
            field_order,
            day_style,
            month_style,
            year_style,
            century,
        })
    }

    /// The pattern string this spec was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    pub fn has_separator(&self) -> bool {
        self.separator.is_some()
    }

    /// Fields in the order they appear, left to right.
    pub fn field_order(&self) -> [DateField; 3] {
        self.field_order
    }

    /// Zero-based slot of `field` in [`field_order`](Self::field_order).
    pub fn position(&self, field: DateField) -> usize {
        self.field_order.iter().position(|f| *f == field).unwrap_or(0)
    }

    pub fn day_style(&self) -> DayStyle {
        self.day_style
    }

    pub fn month_style(&self) -> MonthStyle {
        self.month_style
    }

    pub fn year_style(&self) -> YearStyle {
        self.year_style
    }

    /// Present iff the year style is [`YearStyle::Short`].
    pub fn century(&self) -> Option<CenturyWindow> {
        self.century
    }

    pub fn uses_month_names(&self) -> bool {
        self.month_style == MonthStyle::Name
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PatternSpec {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
