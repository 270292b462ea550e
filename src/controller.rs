//! Mode selection for one date field.
//!
//! The controller owns whichever codec is active and is the single place the
//! field's format/parse traffic goes through:
//!
//! ```text
//!                 set_display_pattern(raw)
//!   NoOverride ───────────────────────────────▶ Pattern
//!   (detector) ◀─────────────────────────────── (codec)
//!       │  ▲      set_display_pattern(None)        │
//!       │  │                                       │
//!       │  └──────── None ─────── Delegated ◀──────┘
//!       └──────────── "$server" ─────▲     "$server"
//! ```
//!
//! Leaving delegation re-renders the field value with the new codec when the
//! remote side drew the text last. A date still waiting on the remote rendering
//! is committed first.
//!
//! Locale changes rebuild the locale detector only while no pattern is set.
//! Otherwise the new locale is remembered and the detector is rebuilt once it
//! is needed again.

use crate::error::PatternError;
use crate::locale::{ChronoLocales, LocaleDateDetector, RendererProvider};
use crate::pattern::{PatternCodec, PatternSpec};
use crate::remote::{RemoteBinding, RemoteDateAuthority, RemoteDelegationAdapter};
use crate::{CalendarDate, Context, Options, ParseOutcome};
use tracing::debug;

/// Reserved display pattern handing formatting and parsing to the remote authority.
pub const SERVER_SIDE_PATTERN: &str = "$server";

/// The host input widget.
pub trait Field {
    fn locale(&self) -> &str;

    /// Text currently shown (or typed).
    fn display_text(&self) -> &str;

    fn set_display_text(&mut self, text: &str);

    fn value(&self) -> Option<CalendarDate>;

    fn commit_value(&mut self, date: CalendarDate);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The locale's own layout.
    NoOverride,
    Pattern,
    Delegated,
}

#[derive(Debug)]
enum ActiveCodec {
    Locale,
    Pattern(PatternCodec),
    Delegated(RemoteDelegationAdapter),
}

impl ActiveCodec {
    fn mode(&self) -> Mode {
        match self {
            ActiveCodec::Locale => Mode::NoOverride,
            ActiveCodec::Pattern(_) => Mode::Pattern,
            ActiveCodec::Delegated(_) => Mode::Delegated,
        }
    }
}

pub struct DatePatternController<F, A> {
    field: F,
    authority: A,
    provider: Box<dyn RendererProvider>,
    options: Options,
    locale: String,
    detector: LocaleDateDetector,
    /// The locale changed while the detector was not in use.
    detector_stale: bool,
    active: ActiveCodec,
}

impl<F: Field, A: RemoteDateAuthority> DatePatternController<F, A> {
    /// Controller using chrono's locales and default options.
    pub fn new(field: F, authority: A) -> Self {
        Self::with_options(field, authority, Box::new(ChronoLocales), Options::default())
    }

    pub fn with_options(field: F, authority: A, provider: Box<dyn RendererProvider>, options: Options) -> Self {
        let locale = field.locale().to_string();
        let detector = LocaleDateDetector::for_locale(provider.as_ref(), &locale, &options);
        DatePatternController {
            field,
            authority,
            provider,
            options,
            locale,
            detector,
            detector_stale: false,
            active: ActiveCodec::Locale,
        }
    }

    // --- Accessors ---------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.active.mode()
    }

    /// The compiled pattern, in [`Mode::Pattern`].
    pub fn active_pattern(&self) -> Option<&PatternSpec> {
        match &self.active {
            ActiveCodec::Pattern(codec) => Some(codec.spec()),
            _ => None,
        }
    }

    /// The outstanding remote request, in [`Mode::Delegated`].
    pub fn remote_binding(&self) -> Option<&RemoteBinding> {
        match &self.active {
            ActiveCodec::Delegated(adapter) => adapter.binding(),
            _ => None,
        }
    }

    /// Most recently announced locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn authority_mut(&mut self) -> &mut A {
        &mut self.authority
    }

    // --- Change events -----------------------------------------------------------

    /// Switch modes. `None` or `""` returns to the locale's layout, [`SERVER_SIDE_PATTERN`]
    /// delegates, anything else is compiled.
    ///
    /// A malformed pattern leaves the current mode in place.
    pub fn set_display_pattern(&mut self, pattern: Option<&str>) -> Result<(), PatternError> {
        let next = match pattern {
            None | Some("") => {
                self.refresh_detector();
                ActiveCodec::Locale
            }
            Some(SERVER_SIDE_PATTERN) => {
                if let ActiveCodec::Delegated(_) = self.active {
                    return Ok(());
                }
                ActiveCodec::Delegated(RemoteDelegationAdapter::new())
            }
            Some(raw) => {
                let spec = PatternSpec::compile_with(raw, self.options.default_century)?;
                if spec.uses_month_names() {
                    self.refresh_detector();
                }
                ActiveCodec::Pattern(PatternCodec::new(spec, self.detector.month_names().to_vec()))
            }
        };

        let previous = std::mem::replace(&mut self.active, next);
        debug!(from = ?previous.mode(), to = ?self.active.mode(), pattern = ?pattern, "display pattern set");

        if let ActiveCodec::Delegated(adapter) = &previous {
            // The date behind an unanswered format request is the one the field is showing.
            if let Some(RemoteBinding::AwaitingFormat(pending)) = adapter.binding() {
                if self.field.value() != Some(*pending) {
                    self.field.commit_value(*pending);
                }
            }
            if adapter.shown_by_format() {
                self.render_value();
            }
        }
        Ok(())
    }

    pub fn on_locale_changed(&mut self, locale: &str) {
        if locale == self.locale {
            return;
        }
        self.locale = locale.to_string();

        if let ActiveCodec::Locale = self.active {
            // Read the text with the old layout before it is gone.
            let shown = self.detector.parse(self.field.display_text());
            self.rebuild_detector();
            if let ParseOutcome::Parsed(date) = shown {
                let text = self.detector.format(&date);
                self.field.set_display_text(&text);
            }
        } else {
            debug!(locale, mode = ?self.mode(), "locale change deferred");
            self.detector_stale = true;
        }
    }

    // --- Field hooks --------------------------------------------------------------

    pub fn format(&mut self, date: &CalendarDate) -> String {
        match &mut self.active {
            ActiveCodec::Locale => self.detector.format(date),
            ActiveCodec::Pattern(codec) => codec.format(date),
            ActiveCodec::Delegated(adapter) => adapter.format(date, &mut self.authority),
        }
    }

    /// Renders nothing for an empty value.
    pub fn format_opt(&mut self, date: Option<&CalendarDate>) -> String {
        match date {
            Some(date) => self.format(date),
            None => String::new(),
        }
    }

    pub fn parse(&mut self, text: &str) -> ParseOutcome {
        match &mut self.active {
            ActiveCodec::Locale => self.detector.parse(text),
            ActiveCodec::Pattern(codec) => codec.parse(text, &Context::for_value(self.field.value().as_ref())),
            ActiveCodec::Delegated(adapter) => adapter.parse(text, &mut self.authority),
        }
    }

    // --- Remote completions --------------------------------------------------------

    /// The authority's rendering of the date last sent for formatting.
    pub fn on_remote_formatted(&mut self, text: &str) -> bool {
        match &mut self.active {
            ActiveCodec::Delegated(adapter) => adapter.format_completed(text, &mut self.field),
            _ => {
                debug!(text, "remote format completion outside delegation");
                false
            }
        }
    }

    /// The authority's reading of the text last sent for parsing.
    pub fn on_remote_parsed(&mut self, date: Option<CalendarDate>) -> bool {
        match &mut self.active {
            ActiveCodec::Delegated(adapter) => adapter.parse_completed(date, &mut self.field),
            _ => {
                debug!(?date, "remote parse completion outside delegation");
                false
            }
        }
    }

    // --- Internals ------------------------------------------------------------------

    fn refresh_detector(&mut self) {
        if self.detector_stale {
            self.rebuild_detector();
        }
    }

    fn rebuild_detector(&mut self) {
        debug!(locale = %self.locale, "rebuilding locale detector");
        self.detector = LocaleDateDetector::for_locale(self.provider.as_ref(), &self.locale, &self.options);
        self.detector_stale = false;
    }

    fn render_value(&mut self) {
        let value = self.field.value();
        let text = self.format_opt(value.as_ref());
        self.field.set_display_text(&text);
    }
}
