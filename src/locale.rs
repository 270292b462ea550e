//! Locale-driven dates.
//!
//! Without a display pattern a field shows dates the way its locale does. The
//! layout is not configured anywhere: it is recovered from how the locale
//! renders one known date.
//!
//! ```text
//! locale tag ── RendererProvider ──▶ LocaleRenderer ──▶ LocaleDateDetector
//!                    (unknown tag: fallback locale, then ISO)   format / parse
//! ```
//!
//! - `renderer.rs`: the renderer seam, the chrono-backed implementation and tag handling.
//! - `detector.rs`: sentinel rendering → positional regex.

#[path = "locale/detector.rs"]
mod detector;
#[path = "locale/renderer.rs"]
mod renderer;

pub use detector::LocaleDateDetector;
pub use renderer::{
    ChronoLocales, ChronoRenderer, ENGLISH_MONTH_NAMES, IsoRenderer, LocaleRenderer, RendererProvider, tag_candidates,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalendarDate, CenturyWindow, DateField, LocaleError, Options, ParseOutcome};
    use chrono::NaiveDateTime;

    /// Renders with a fixed strftime layout.
    struct FakeRenderer {
        tag: &'static str,
        layout: &'static str,
    }

    impl LocaleRenderer for FakeRenderer {
        fn tag(&self) -> &str {
            self.tag
        }

        fn render(&self, at: NaiveDateTime) -> String {
            at.format(self.layout).to_string()
        }

        fn month_names(&self) -> Vec<String> {
            ENGLISH_MONTH_NAMES.iter().map(|name| name.to_string()).collect()
        }
    }

    fn detector(layout: &'static str) -> LocaleDateDetector {
        LocaleDateDetector::with_renderer(Box::new(FakeRenderer { tag: "xx_XX", layout }), CenturyWindow::default())
    }

    struct OnlyGerman;

    impl RendererProvider for OnlyGerman {
        fn renderer_for(&self, tag: &str) -> Result<Box<dyn LocaleRenderer>, LocaleError> {
            match tag {
                "de_DE" => Ok(Box::new(FakeRenderer { tag: "de_DE", layout: "%d.%m.%Y" })),
                other => Err(LocaleError::Unsupported(other.to_string())),
            }
        }
    }

    #[test]
    fn detects_field_order_from_sentinel() {
        let cases: Vec<(&str, [DateField; 3], &str)> = vec![
            ("%m/%d/%Y", [DateField::Month, DateField::Day, DateField::Year], r"^(\d{1,2})/(\d{1,2})/(\d{1,4})$"),
            ("%d.%m.%Y", [DateField::Day, DateField::Month, DateField::Year], r"^(\d{1,2})\.(\d{1,2})\.(\d{1,4})$"),
            ("%Y-%m-%d", [DateField::Year, DateField::Month, DateField::Day], r"^(\d{1,4})\-(\d{1,2})\-(\d{1,2})$"),
            ("%d/%m/%y", [DateField::Day, DateField::Month, DateField::Year], r"^(\d{1,2})/(\d{1,2})/(\d{1,2})$"),
        ];

        for (layout, order, regex) in cases {
            let detector = detector(layout);
            assert!(detector.is_detected(), "layout {layout}");
            assert_eq!(detector.field_order(), Some(order), "layout {layout}");
            assert_eq!(detector.regex(), Some(regex), "layout {layout}");
        }
    }

    #[test]
    fn regex_matches_sentinel_rendering() {
        for layout in ["%m/%d/%Y", "%d.%m.%Y", "%Y-%m-%d", "%d/%m/%y", "%Y年%m月%d日"] {
            let detector = detector(layout);
            let sentinel = CalendarDate::new(1987, 10, 22);
            let rendered = detector.format(&sentinel);
            let regex = regex::Regex::new(detector.regex().unwrap()).unwrap();

            let caps = regex.captures(&rendered).unwrap();
            assert_eq!(caps.len(), 4, "layout {layout}");
            assert_eq!(detector.parse(&rendered), ParseOutcome::Parsed(sentinel), "layout {layout}");
        }
    }

    #[test]
    fn us_layout_round_trip() {
        let detector = detector("%m/%d/%Y");
        let date = CalendarDate::new(2024, 2, 5);

        assert_eq!(detector.format(&date), "03/05/2024");
        assert_eq!(detector.parse("03/05/2024"), ParseOutcome::Parsed(date));
        assert_eq!(detector.parse("3/5/2024"), ParseOutcome::Parsed(date));
    }

    #[test]
    fn german_layout_parses_day_first() {
        let detector = detector("%d.%m.%Y");
        assert_eq!(detector.parse("05.03.2024"), ParseOutcome::Parsed(CalendarDate::new(2024, 2, 5)));
        assert_eq!(detector.parse("05/03/2024"), ParseOutcome::Invalid);
    }

    #[test]
    fn short_year_locale_resolves_century() {
        let detector = detector("%d/%m/%y");
        assert_eq!(detector.format(&CalendarDate::new(2024, 2, 5)), "05/03/24");
        assert_eq!(detector.parse("05/03/24"), ParseOutcome::Parsed(CalendarDate::new(2024, 2, 5)));
        assert_eq!(detector.parse("22/11/87"), ParseOutcome::Parsed(CalendarDate::new(1987, 10, 22)));
    }

    #[test]
    fn non_ascii_characters_are_ignored() {
        let detector = detector("%Y年%m月%d日");
        assert_eq!(detector.format(&CalendarDate::new(2024, 2, 5)), "20240305");
        assert_eq!(detector.parse("2024年3月5日"), ParseOutcome::Parsed(CalendarDate::new(2024, 2, 5)));
        assert_eq!(detector.parse("\u{200e}05.03.2024"), ParseOutcome::Invalid);
    }

    #[test]
    fn malformed_input() {
        let detector = detector("%m/%d/%Y");
        assert_eq!(detector.parse(""), ParseOutcome::Empty);
        assert_eq!(detector.parse("  "), ParseOutcome::Empty);
        assert_eq!(detector.parse("00/05/2024"), ParseOutcome::Invalid);
        assert_eq!(detector.parse("13/05/2024"), ParseOutcome::Invalid);
        assert_eq!(detector.parse("03/05"), ParseOutcome::Invalid);
        assert_eq!(detector.parse("March 5, 2024"), ParseOutcome::Invalid);
    }

    #[test]
    fn undetectable_layout_never_parses() {
        let detector = detector("%A");
        assert!(!detector.is_detected());
        assert_eq!(detector.parse("22/11/1987"), ParseOutcome::Invalid);
        assert_eq!(detector.format(&CalendarDate::new(1987, 10, 22)), "Sunday");
    }

    #[test]
    fn unrepresentable_dates_format_empty() {
        let detector = detector("%d.%m.%Y");
        assert_eq!(detector.format(&CalendarDate::new(2023, 1, 30)), "");
        assert_eq!(detector.format_opt(None), "");
    }

    #[test]
    fn unsupported_locale_falls_back() {
        let options = Options { fallback_locale: "de_DE".to_string(), ..Options::default() };
        let detector = LocaleDateDetector::for_locale(&OnlyGerman, "fr_FR", &options);
        assert_eq!(detector.locale(), "de_DE");

        let detector = LocaleDateDetector::for_locale(&OnlyGerman, "fr_FR", &Options::default());
        assert_eq!(detector.locale(), "iso");
        assert_eq!(detector.parse("2024-03-05"), ParseOutcome::Parsed(CalendarDate::new(2024, 2, 5)));
    }

    #[test]
    fn chrono_locales_detect() {
        let us = LocaleDateDetector::for_locale(&ChronoLocales, "en-US", &Options::default());
        assert_eq!(us.field_order(), Some([DateField::Month, DateField::Day, DateField::Year]));
        assert_eq!(us.month_names()[2], "March");

        let de = LocaleDateDetector::for_locale(&ChronoLocales, "de-DE", &Options::default());
        assert_eq!(de.field_order(), Some([DateField::Day, DateField::Month, DateField::Year]));
        assert_eq!(de.parse("5.3.2024"), ParseOutcome::Parsed(CalendarDate::new(2024, 2, 5)));
    }
}
