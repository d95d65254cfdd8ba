use chrono::NaiveDateTime;
use std::fmt;

/// A single timed event from today's calendar listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarEvent {
    pub start_time: NaiveDateTime,
    pub title: String,
}

impl CalendarEvent {
    pub fn new(start_time: NaiveDateTime, title: impl Into<String>) -> Self {
        Self {
            start_time,
            title: title.into(),
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_time.format("%H:%M"), self.title)
    }
}
