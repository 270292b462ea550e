//! Typed construction of pattern strings.
//!
//! Stored configurations carry the raw pattern string; application code is
//! easier to read when it states the pattern through named settings instead.
//! [`SimpleDatePattern`] produces exactly the wire string the compiler reads.

use super::century::CenturyWindow;
use super::spec::{DateField, MonthStyle, PatternSpec};
use crate::error::PatternError;
use std::fmt;
use tracing::warn;

/// Separator used when a setting requires one and none was chosen.
pub const DEFAULT_SEPARATOR: char = '-';

/// Order of the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayOrder {
    DayMonthYear,
    MonthDayYear,
    #[default]
    YearMonthDay,
}

impl DisplayOrder {
    pub const fn fields(self) -> [DateField; 3] {
        match self {
            DisplayOrder::DayMonthYear => [DateField::Day, DateField::Month, DateField::Year],
            DisplayOrder::MonthDayYear => [DateField::Month, DateField::Day, DateField::Year],
            DisplayOrder::YearMonthDay => [DateField::Year, DateField::Month, DateField::Day],
        }
    }
}

/// Builder for display patterns.
///
/// Defaults to `yyyy-MM-dd`: dash separator, zero-prefixed day and month, full year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDatePattern {
    separator: Option<char>,
    zero_prefixed_day: bool,
    month_style: MonthStyle,
    short_year: bool,
    century: CenturyWindow,
    display_order: DisplayOrder,
}

impl Default for SimpleDatePattern {
    fn default() -> Self {
        SimpleDatePattern {
            separator: Some(DEFAULT_SEPARATOR),
            zero_prefixed_day: true,
            month_style: MonthStyle::ZeroPadded,
            short_year: false,
            century: CenturyWindow::default(),
            display_order: DisplayOrder::default(),
        }
    }
}

impl SimpleDatePattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Packed layout. Bare numbers cannot be told apart without a separator,
    /// so day and month become zero-prefixed.
    pub fn without_separator(mut self) -> Self {
        self.separator = None;
        if !self.zero_prefixed_day || self.month_style == MonthStyle::Bare {
            warn!("dropping the date separator, turning on zero-prefixed day and month");
            self.zero_prefixed_day = true;
            if self.month_style == MonthStyle::Bare {
                self.month_style = MonthStyle::ZeroPadded;
            }
        }
        self
    }

    pub fn with_zero_prefixed_day(mut self, zero_prefixed: bool) -> Self {
        self.zero_prefixed_day = zero_prefixed;
        if !zero_prefixed {
            self.require_separator();
        }
        self
    }

    pub fn with_zero_prefixed_month(mut self, zero_prefixed: bool) -> Self {
        self.month_style = if zero_prefixed { MonthStyle::ZeroPadded } else { MonthStyle::Bare };
        if !zero_prefixed {
            self.require_separator();
        }
        self
    }

    /// Show the month by its localized name.
    pub fn with_month_names(mut self) -> Self {
        self.month_style = MonthStyle::Name;
        self
    }

    pub fn with_short_year(mut self, short_year: bool) -> Self {
        self.short_year = short_year;
        self
    }

    /// Century settings; only written out for short years.
    pub fn with_century(mut self, century: CenturyWindow) -> Self {
        self.century = century;
        self
    }

    pub fn with_display_order(mut self, display_order: DisplayOrder) -> Self {
        self.display_order = display_order;
        self
    }

    fn require_separator(&mut self) {
        if self.separator.is_none() {
            warn!(separator = %DEFAULT_SEPARATOR, "bare day or month needs a separator, using the default one");
            self.separator = Some(DEFAULT_SEPARATOR);
        }
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    pub fn display_order(&self) -> DisplayOrder {
        self.display_order
    }

    pub fn century(&self) -> CenturyWindow {
        self.century
    }

    /// The raw pattern string understood by [`PatternSpec::compile`].
    pub fn to_pattern_string(&self) -> String {
        let mut out = String::with_capacity(12);
        if let Some(separator) = self.separator {
            out.push(separator);
        }
        for field in self.display_order.fields() {
            out.push_str(match field {
                DateField::Day if self.zero_prefixed_day => "0d",
                DateField::Day => "_d",
                DateField::Month => match self.month_style {
                    MonthStyle::ZeroPadded => "0M",
                    MonthStyle::Bare => "_M",
                    MonthStyle::Name => "mM",
                },
                DateField::Year if self.short_year => "0y",
                DateField::Year => "_y",
            });
        }
        if self.short_year {
            out.push_str(&self.century.to_suffix());
        }
        out
    }

    pub fn compile(&self) -> Result<PatternSpec, PatternError> {
        PatternSpec::compile_with(&self.to_pattern_string(), self.century)
    }
}

impl fmt::Display for SimpleDatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern_string())
    }
}

/// Commonly used patterns.
pub mod presets {
    use super::{DisplayOrder, SimpleDatePattern};
    use crate::pattern::CenturyWindow;

    /// `yyyy-MM-dd`, e.g. `2024-03-05`.
    pub fn yyyy_mm_dd() -> SimpleDatePattern {
        SimpleDatePattern::new()
    }

    /// `dd.MM.yyyy`, e.g. `05.03.2024`.
    pub fn dd_mm_yyyy_dotted() -> SimpleDatePattern {
        SimpleDatePattern::new().with_display_order(DisplayOrder::DayMonthYear).with_separator('.')
    }

    /// `d.M.yy`, e.g. `5.3.24`; short years below 40 are in the 2000s.
    pub fn d_m_yy_dotted() -> SimpleDatePattern {
        SimpleDatePattern::new()
            .with_display_order(DisplayOrder::DayMonthYear)
            .with_separator('.')
            .with_zero_prefixed_day(false)
            .with_zero_prefixed_month(false)
            .with_short_year(true)
            .with_century(CenturyWindow::new(21, 40, false))
    }

    /// `M/d/yyyy`, e.g. `3/5/2024`.
    pub fn m_d_yyyy_slash() -> SimpleDatePattern {
        SimpleDatePattern::new()
            .with_display_order(DisplayOrder::MonthDayYear)
            .with_separator('/')
            .with_zero_prefixed_day(false)
            .with_zero_prefixed_month(false)
    }

    /// `yyyyMMdd`, e.g. `20240305`.
    pub fn yyyymmdd() -> SimpleDatePattern {
        SimpleDatePattern::new().without_separator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Layout;

    #[test]
    fn presets_produce_wire_strings() {
        assert_eq!(presets::yyyy_mm_dd().to_pattern_string(), "-_y0M0d");
        assert_eq!(presets::dd_mm_yyyy_dotted().to_pattern_string(), ".0d0M_y");
        assert_eq!(presets::d_m_yy_dotted().to_pattern_string(), "._d_M0y-2140");
        assert_eq!(presets::m_d_yyyy_slash().to_pattern_string(), "/_M_d_y");
        assert_eq!(presets::yyyymmdd().to_pattern_string(), "_y0M0d");
    }

    #[test]
    fn every_preset_compiles() {
        for preset in [
            presets::yyyy_mm_dd(),
            presets::dd_mm_yyyy_dotted(),
            presets::d_m_yy_dotted(),
            presets::m_d_yyyy_slash(),
            presets::yyyymmdd(),
        ] {
            let spec = preset.compile().unwrap();
            assert_eq!(spec.raw(), preset.to_string());
        }
    }

    #[test]
    fn bare_fields_bring_back_a_separator() {
        let pattern = SimpleDatePattern::new().without_separator().with_zero_prefixed_month(false);
        assert_eq!(pattern.separator(), Some(DEFAULT_SEPARATOR));
        assert_eq!(pattern.to_pattern_string(), "-_y_M0d");
    }

    #[test]
    fn dropping_separator_pads_fields() {
        let pattern = SimpleDatePattern::new()
            .with_display_order(DisplayOrder::DayMonthYear)
            .with_zero_prefixed_day(false)
            .without_separator();
        assert_eq!(pattern.to_pattern_string(), "0d0M_y");
        assert_eq!(pattern.compile().unwrap().layout(), Layout::Packed);
    }

    #[test]
    fn month_names_and_short_year_with_custom_century() {
        let pattern = SimpleDatePattern::new()
            .with_display_order(DisplayOrder::DayMonthYear)
            .with_separator(' ')
            .with_month_names()
            .with_short_year(true)
            .with_century(CenturyWindow::new(20, 50, true));
        assert_eq!(pattern.to_pattern_string(), " 0dmM0y+2050");

        let spec = pattern.compile().unwrap();
        assert!(spec.uses_month_names());
        assert_eq!(spec.century(), Some(CenturyWindow::new(20, 50, true)));
    }
}
