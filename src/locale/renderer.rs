//! Locale renderers.
//!
//! A renderer is the locale's native date formatting: whatever a host would
//! show by default for a timestamp, plus the locale's month names. Renderers
//! are looked up by tag through a [`RendererProvider`].

use crate::error::LocaleError;
use chrono::{Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const ENGLISH_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Native date rendering of one locale.
pub trait LocaleRenderer {
    /// Tag of the locale actually rendered, e.g. `de_DE`.
    fn tag(&self) -> &str;

    /// The locale's default short date rendering of `at`.
    fn render(&self, at: NaiveDateTime) -> String;

    /// Month names, January first.
    fn month_names(&self) -> Vec<String>;
}

/// Looks up renderers by locale tag.
pub trait RendererProvider {
    fn renderer_for(&self, tag: &str) -> Result<Box<dyn LocaleRenderer>, LocaleError>;
}

// --- chrono ---------------------------------------------------------------------

/// Renderer backed by chrono's localized `%x` and `%B`.
#[derive(Debug, Clone)]
pub struct ChronoRenderer {
    tag: String,
    locale: Locale,
}

impl ChronoRenderer {
    /// Accepts BCP 47 style tags (`en-US`, `de`) as well as POSIX names (`en_US`).
    pub fn new(tag: &str) -> Result<Self, LocaleError> {
        tag_candidates(tag)
            .into_iter()
            .find_map(|candidate| {
                let locale = Locale::try_from(candidate.as_str()).ok()?;
                Some(ChronoRenderer { tag: candidate, locale })
            })
            .ok_or_else(|| LocaleError::Unsupported(tag.to_string()))
    }
}

impl LocaleRenderer for ChronoRenderer {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn render(&self, at: NaiveDateTime) -> String {
        Utc.from_utc_datetime(&at).format_localized("%x", self.locale).to_string()
    }

    fn month_names(&self) -> Vec<String> {
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(2000, month, 1)?.and_hms_opt(12, 0, 0))
            .map(|at| Utc.from_utc_datetime(&at).format_localized("%B", self.locale).to_string())
            .collect()
    }
}

/// Provider for every locale chrono knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLocales;

impl RendererProvider for ChronoLocales {
    fn renderer_for(&self, tag: &str) -> Result<Box<dyn LocaleRenderer>, LocaleError> {
        Ok(Box::new(ChronoRenderer::new(tag)?))
    }
}

// --- ISO ---------------------------------------------------------------------------

/// `YYYY-MM-DD` with English month names; used when no locale can be resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoRenderer;

impl LocaleRenderer for IsoRenderer {
    fn tag(&self) -> &str {
        "iso"
    }

    fn render(&self, at: NaiveDateTime) -> String {
        at.format("%Y-%m-%d").to_string()
    }

    fn month_names(&self) -> Vec<String> {
        ENGLISH_MONTH_NAMES.iter().map(|name| name.to_string()).collect()
    }
}

// --- Tags ----------------------------------------------------------------------------

/// Spellings of `tag` to try, most specific first.
///
/// `en-us` → `en-us`, `en_US`, `en`; `de` → `de`, `de_DE`.
pub fn tag_candidates(tag: &str) -> Vec<String> {
    let tag = tag.trim();
    let mut out = vec![tag.to_string()];
    let mut push = |candidate: String| {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    };

    let shape = regex!(r"^([A-Za-z]{2,3})(?:[-_][A-Za-z]{4})?(?:[-_]([A-Za-z]{2}|\d{3}))?(?:[.@].*)?$");
    if let Some(caps) = shape.captures(tag) {
        let language = caps[1].to_lowercase();
        let region = caps.get(2).map_or_else(|| language.to_uppercase(), |region| region.as_str().to_uppercase());
        push(format!("{language}_{region}"));
        push(language);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_candidates_normalize_spelling() {
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("en-us", vec!["en-us", "en_US", "en"]),
            ("en_US", vec!["en_US", "en"]),
            ("de", vec!["de", "de_DE"]),
            ("sr-Latn-RS", vec!["sr-Latn-RS", "sr_RS", "sr"]),
            ("es-419", vec!["es-419", "es_419", "es"]),
            ("POSIX", vec!["POSIX"]),
        ];

        for (tag, expected) in cases {
            assert_eq!(tag_candidates(tag), expected, "tag {tag:?}");
        }
    }

    #[test]
    fn chrono_renderer_resolves_common_tags() {
        assert_eq!(ChronoRenderer::new("en-US").unwrap().tag(), "en_US");
        assert_eq!(ChronoRenderer::new("de").unwrap().tag(), "de_DE");
        assert!(matches!(ChronoRenderer::new("xx-YY"), Err(LocaleError::Unsupported(tag)) if tag == "xx-YY"));
    }

    #[test]
    fn chrono_renderer_uses_locale_layout() {
        let at = NaiveDate::from_ymd_opt(1987, 11, 22).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(ChronoRenderer::new("en_US").unwrap().render(at), "11/22/1987");
        assert_eq!(ChronoRenderer::new("de_DE").unwrap().render(at), "22.11.1987");
    }

    #[test]
    fn chrono_month_names() {
        let names = ChronoRenderer::new("en_US").unwrap().month_names();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "January");
        assert_eq!(names[11], "December");

        let german = ChronoRenderer::new("de_DE").unwrap().month_names();
        assert_eq!(german[2], "März");
    }

    #[test]
    fn iso_renderer() {
        let at = NaiveDate::from_ymd_opt(1987, 11, 22).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(IsoRenderer.render(at), "1987-11-22");
        assert_eq!(IsoRenderer.month_names()[4], "May");
    }
}
