//! In-memory collaborators for unit tests.

use crate::{CalendarDate, Field, RemoteDateAuthority};

#[derive(Debug, Default)]
pub struct MemoryField {
    pub locale: String,
    pub text: String,
    pub value: Option<CalendarDate>,
    pub commits: usize,
}

impl MemoryField {
    pub fn new(locale: &str) -> Self {
        MemoryField { locale: locale.to_string(), ..Self::default() }
    }
}

impl Field for MemoryField {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn display_text(&self) -> &str {
        &self.text
    }

    fn set_display_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn value(&self) -> Option<CalendarDate> {
        self.value
    }

    fn commit_value(&mut self, date: CalendarDate) {
        self.value = Some(date);
        self.commits += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Format(i32, u32, u32),
    Parse(String),
}

#[derive(Debug, Default)]
pub struct RecordingAuthority {
    pub requests: Vec<Request>,
}

impl RemoteDateAuthority for RecordingAuthority {
    fn request_format(&mut self, year: i32, month: u32, day: u32) {
        self.requests.push(Request::Format(year, month, day));
    }

    fn request_parse(&mut self, text: &str) {
        self.requests.push(Request::Parse(text.to_string()));
    }
}
