use crate::components::calendar::CalendarEvent;
use chrono::{Duration, NaiveDateTime};

/// Today's active events and when they were last fetched
#[derive(Debug, Clone, Default)]
pub struct ReminderState {
    events: Vec<CalendarEvent>,
    last_refresh: Option<NaiveDateTime>,
}

impl ReminderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn last_refresh(&self) -> Option<NaiveDateTime> {
        self.last_refresh
    }

    /// Whether the event list is due to be fetched again
    pub fn needs_refresh(&self, now: NaiveDateTime, interval: Duration) -> bool {
        match self.last_refresh {
            Some(last) => now.signed_duration_since(last) >= interval,
            None => true,
        }
    }

    /// Replace the whole event list and stamp the refresh time
    pub fn replace(&mut self, events: Vec<CalendarEvent>, now: NaiveDateTime) {
        self.events = events;
        self.last_refresh = Some(now);
    }

    /// Events still ahead of `now`, earliest first
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&CalendarEvent> {
        let mut upcoming: Vec<_> = self.events.iter().filter(|e| e.start_time > now).collect();
        upcoming.sort();
        upcoming
    }

    /// Events starting between `now` and `now + lead_time`, inclusive
    pub fn due(&self, now: NaiveDateTime, lead_time: Duration) -> Vec<CalendarEvent> {
        self.events
            .iter()
            .filter(|e| {
                let delta = e.start_time.signed_duration_since(now);
                delta >= Duration::zero() && delta <= lead_time
            })
            .cloned()
            .collect()
    }

    pub fn contains(&self, event: &CalendarEvent) -> bool {
        self.events.contains(event)
    }

    /// Drop every entry equal to `event` so it cannot fire again
    pub fn remove(&mut self, event: &CalendarEvent) {
        self.events.retain(|e| e != event);
    }
}
