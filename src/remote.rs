//! Delegation of formatting and parsing to a remote authority.
//!
//! The authority answers later, through [`RemoteDelegationAdapter::format_completed`]
//! and [`RemoteDelegationAdapter::parse_completed`]. Meanwhile the adapter
//! answers the field synchronously with a placeholder and keeps at most one
//! request outstanding:
//!
//! ```text
//!              format(d) ─▶ request_format, show ISO(d)
//!   idle ─────────────────────────────────────────▶ AwaitingFormat(d)
//!    ▲  ─────────────────────────────────────────▶ AwaitingParse(t)
//!    │         parse(t)  ─▶ request_parse, Pending          │
//!    │                                                      │
//!    └──────────── format_completed / parse_completed ◀─────┘
//! ```
//!
//! While a request is outstanding the opposite operation is pinned to
//! identity: parse hands back the date being formatted, format hands back the
//! text being parsed. A repeated call in the same direction issues nothing.
//!
//! Requests are never retried and never time out.

use crate::controller::Field;
use crate::{CalendarDate, ParseOutcome};
use tracing::debug;

/// Something that formats and parses dates on request and answers later.
pub trait RemoteDateAuthority {
    /// `month` is one based.
    fn request_format(&mut self, year: i32, month: u32, day: u32);

    fn request_parse(&mut self, text: &str);
}

/// The request currently outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteBinding {
    AwaitingFormat(CalendarDate),
    AwaitingParse(String),
}

/// Direction of an outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Formatting,
    Parsing,
}

#[derive(Debug, Default)]
pub struct RemoteDelegationAdapter {
    binding: Option<RemoteBinding>,
    shown_by_format: bool,
}

impl RemoteDelegationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<&RemoteBinding> {
        self.binding.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        match self.binding {
            Some(RemoteBinding::AwaitingFormat(_)) => Some(Role::Formatting),
            Some(RemoteBinding::AwaitingParse(_)) => Some(Role::Parsing),
            None => None,
        }
    }

    /// Whether the field's text was last produced by formatting.
    pub fn shown_by_format(&self) -> bool {
        self.shown_by_format
    }

    /// Provisional ISO text; the authority's rendering arrives later.
    pub fn format(&mut self, date: &CalendarDate, authority: &mut dyn RemoteDateAuthority) -> String {
        match &self.binding {
            Some(RemoteBinding::AwaitingParse(text)) => text.clone(),
            Some(RemoteBinding::AwaitingFormat(pending)) => pending.to_iso_string(),
            None => {
                self.binding = Some(RemoteBinding::AwaitingFormat(*date));
                self.shown_by_format = true;
                authority.request_format(date.year, date.month.saturating_add(1), date.day);
                date.to_iso_string()
            }
        }
    }

    pub fn parse(&mut self, text: &str, authority: &mut dyn RemoteDateAuthority) -> ParseOutcome {
        match &self.binding {
            Some(RemoteBinding::AwaitingFormat(pending)) => ParseOutcome::Parsed(*pending),
            Some(RemoteBinding::AwaitingParse(_)) => ParseOutcome::Pending,
            None if text.trim().is_empty() => ParseOutcome::Empty,
            None => {
                self.binding = Some(RemoteBinding::AwaitingParse(text.to_string()));
                authority.request_parse(text);
                ParseOutcome::Pending
            }
        }
    }

    /// Apply the authority's rendering. Returns `false` for a completion
    /// nothing is waiting for.
    pub fn format_completed<F: Field + ?Sized>(&mut self, text: &str, field: &mut F) -> bool {
        let Some(RemoteBinding::AwaitingFormat(date)) = self.binding else {
            debug!(text, "ignoring stale remote format completion");
            return false;
        };
        self.binding = None;
        field.set_display_text(text);
        field.commit_value(date);
        true
    }

    /// Apply the authority's reading of the text; `None` leaves the value alone.
    pub fn parse_completed<F: Field + ?Sized>(&mut self, date: Option<CalendarDate>, field: &mut F) -> bool {
        if !matches!(self.binding, Some(RemoteBinding::AwaitingParse(_))) {
            debug!(?date, "ignoring stale remote parse completion");
            return false;
        }
        self.binding = None;
        self.shown_by_format = false;
        if let Some(date) = date {
            field.commit_value(date);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryField, RecordingAuthority, Request};

    #[test]
    fn format_shows_iso_then_remote_text() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();
        let mut field = MemoryField::new("en_US");
        let date = CalendarDate::new(2024, 2, 5);

        assert_eq!(adapter.format(&date, &mut authority), "2024-03-05");
        assert_eq!(authority.requests, vec![Request::Format(2024, 3, 5)]);
        assert_eq!(adapter.role(), Some(Role::Formatting));

        assert!(adapter.format_completed("March 5th", &mut field));
        assert_eq!(field.text, "March 5th");
        assert_eq!(field.value, Some(date));
        assert_eq!(adapter.role(), None);
        assert!(adapter.shown_by_format());
    }

    #[test]
    fn parse_is_pending_until_completion() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();
        let mut field = MemoryField::new("en_US");

        assert_eq!(adapter.parse("tomorrow", &mut authority), ParseOutcome::Pending);
        assert_eq!(authority.requests, vec![Request::Parse("tomorrow".to_string())]);
        assert_eq!(adapter.binding(), Some(&RemoteBinding::AwaitingParse("tomorrow".to_string())));

        assert!(adapter.parse_completed(Some(CalendarDate::new(2013, 1, 13)), &mut field));
        assert_eq!(field.value, Some(CalendarDate::new(2013, 1, 13)));
        assert_eq!(adapter.binding(), None);
    }

    #[test]
    fn single_request_in_flight_per_role() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();

        assert_eq!(adapter.parse("first", &mut authority), ParseOutcome::Pending);
        assert_eq!(adapter.parse("second", &mut authority), ParseOutcome::Pending);
        assert_eq!(authority.requests.len(), 1);

        let mut adapter = RemoteDelegationAdapter::new();
        adapter.format(&CalendarDate::new(2024, 2, 5), &mut authority);
        assert_eq!(adapter.format(&CalendarDate::new(2025, 0, 1), &mut authority), "2024-03-05");
        assert_eq!(authority.requests.len(), 2);
    }

    #[test]
    fn opposite_direction_is_identity_while_pending() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();
        let date = CalendarDate::new(2024, 2, 5);

        adapter.format(&date, &mut authority);
        assert_eq!(adapter.parse("2024-03-05", &mut authority), ParseOutcome::Parsed(date));

        let mut adapter = RemoteDelegationAdapter::new();
        adapter.parse("next friday", &mut authority);
        assert_eq!(adapter.format(&date, &mut authority), "next friday");
        assert_eq!(authority.requests.len(), 2);
    }

    #[test]
    fn blank_parse_issues_nothing() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();
        assert_eq!(adapter.parse("  ", &mut authority), ParseOutcome::Empty);
        assert!(authority.requests.is_empty());
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut adapter = RemoteDelegationAdapter::new();
        let mut authority = RecordingAuthority::default();
        let mut field = MemoryField::new("en_US");

        assert!(!adapter.format_completed("late", &mut field));
        assert!(!adapter.parse_completed(Some(CalendarDate::new(2000, 0, 1)), &mut field));

        adapter.parse("x", &mut authority);
        assert!(!adapter.format_completed("wrong direction", &mut field));
        assert_eq!(field.text, "");
        assert_eq!(field.commits, 0);

        assert!(adapter.parse_completed(None, &mut field));
        assert_eq!(field.value, None);
    }
}
