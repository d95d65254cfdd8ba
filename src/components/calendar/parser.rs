use super::models::CalendarEvent;
use crate::error::{parse_error, ReminderResult};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

/// Marker icalBuddy puts in front of every event title
pub const BULLET: char = '•';

lazy_static! {
    /// `H:MM - H:MM` or the open-ended `H:MM - ...`, capturing the start hour and minute
    static ref TIME_RANGE: Regex =
        Regex::new(r"([0-9]{1,2}):([0-9]{2})\s*-\s*(?:[0-9]{1,2}:[0-9]{2}|\.\.\.|…)")
            .expect("time range pattern is valid");
}

/// Parser for the plain-text listing of today's events
#[derive(Debug, Clone, Copy)]
pub struct EventParser {
    stale_after: Duration,
}

impl Default for EventParser {
    fn default() -> Self {
        Self::new(Duration::seconds(3600))
    }
}

impl EventParser {
    /// Create a parser dropping events that started more than `stale_after` ago
    pub fn new(stale_after: Duration) -> Self {
        Self { stale_after }
    }

    /// Extract timed events from the listing, relative to `now`
    pub fn parse(&self, raw: &str, now: NaiveDateTime) -> Vec<CalendarEvent> {
        let today = now.date();
        let mut events = Vec::new();
        let mut pending_title: Option<&str> = None;

        for line in raw.lines() {
            let line = line.trim();

            if let Some(title) = line.strip_prefix(BULLET) {
                pending_title = Some(title.trim());
                continue;
            }

            if let Some(caps) = TIME_RANGE.captures(line) {
                // The title stays pending, a later time line reuses it
                let Some(title) = pending_title else {
                    continue;
                };

                let start = match start_time(&caps[1], &caps[2]) {
                    Ok(time) => today.and_time(time),
                    Err(e) => {
                        warn!("Skipping line {:?}: {}", line, e);
                        continue;
                    }
                };

                if now.signed_duration_since(start) > self.stale_after {
                    continue;
                }

                let event = CalendarEvent::new(start, title);
                debug!("Parsed event: {}", event);
                events.push(event);
            } else if !line.is_empty() && !line.chars().any(|c| c.is_ascii_digit()) {
                // All-day event, no reminder is scheduled for it
                debug!("Ignoring all-day event line: {}", line);
            }
        }

        events
    }
}

/// Parse `raw` with the default one hour staleness window
pub fn parse(raw: &str, now: NaiveDateTime) -> Vec<CalendarEvent> {
    EventParser::default().parse(raw, now)
}

fn start_time(hour: &str, minute: &str) -> ReminderResult<NaiveTime> {
    let hour = hour
        .parse::<u32>()
        .map_err(|e| parse_error(&format!("invalid hour {hour:?}: {e}")))?;
    let minute = minute
        .parse::<u32>()
        .map_err(|e| parse_error(&format!("invalid minute {minute:?}: {e}")))?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| parse_error(&format!("{hour}:{minute:02} is not a valid time of day")))
}
