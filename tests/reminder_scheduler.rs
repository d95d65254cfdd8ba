use async_trait::async_trait;
use calendar_reminder::components::calendar::{CalendarEvent, EventSource};
use calendar_reminder::components::notifier::{Notifier, ProcessNotifier};
use calendar_reminder::components::reminder::ReminderScheduler;
use calendar_reminder::config::Config;
use calendar_reminder::error::{calendar_source_error, notify_error, Error, ReminderResult};
use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime, Timelike};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{sleep, timeout};

/// Mock calendar source returning a fixed listing, or failing
#[derive(Debug, Clone, Default)]
pub struct MockEventSource {
    listing: Arc<Mutex<Option<String>>>,
    fetches: Arc<Mutex<usize>>,
}

impl MockEventSource {
    pub fn new(listing: &str) -> Self {
        Self {
            listing: Arc::new(Mutex::new(Some(listing.to_string()))),
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    /// A source whose command always exits non-zero
    pub fn failing() -> Self {
        Self::default()
    }

    pub async fn set_listing(&self, listing: &str) {
        *self.listing.lock().await = Some(listing.to_string());
    }

    pub async fn fetches(&self) -> usize {
        *self.fetches.lock().await
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn fetch_raw_listing(&self) -> ReminderResult<String> {
        *self.fetches.lock().await += 1;
        self.listing
            .lock()
            .await
            .clone()
            .ok_or_else(|| calendar_source_error("icalBuddy exited with status 1"))
    }
}

/// Notifier recording every title it is asked to show
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    titles: Arc<Mutex<Vec<String>>>,
    fail: bool,
    block: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose window always crashes
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// A notifier whose window is never dismissed
    pub fn blocking() -> Self {
        Self {
            block: true,
            ..Default::default()
        }
    }

    pub async fn titles(&self) -> Vec<String> {
        self.titles.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, title: &str) -> ReminderResult<()> {
        self.titles.lock().await.push(title.to_string());
        if self.block {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(notify_error("Reminder window exited with status 1"));
        }
        Ok(())
    }
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 27)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

const LISTING: &str = "• テスト (次郎共有)\n    1:00 - 2:00\n• バイト (幸恵共有予定)\n    10:00 - 14:00\n• 鈴木歯科 (幸恵共有予定)\n    16:30 - 17:30";

fn scheduler(
    source: MockEventSource,
    notifier: RecordingNotifier,
) -> ReminderScheduler<MockEventSource, RecordingNotifier> {
    ReminderScheduler::new(source, notifier, &Config::default()).unwrap()
}

/// Test that the first tick loads today's events
#[tokio::test]
async fn test_first_tick_refreshes() {
    let source = MockEventSource::new(LISTING);
    let mut scheduler = scheduler(source.clone(), RecordingNotifier::new());

    let fired = scheduler.tick(at(0, 30, 0)).await;

    assert_eq!(fired, 0);
    assert_eq!(source.fetches().await, 1);
    assert_eq!(scheduler.state().events().len(), 3);
    assert_eq!(scheduler.state().last_refresh(), Some(at(0, 30, 0)));
}

/// Test that scans between refreshes reuse the list
#[tokio::test]
async fn test_refresh_every_minute() {
    let source = MockEventSource::new(LISTING);
    let mut scheduler = scheduler(source.clone(), RecordingNotifier::new());

    scheduler.tick(at(9, 0, 0)).await;
    scheduler.tick(at(9, 0, 10)).await;
    scheduler.tick(at(9, 0, 50)).await;
    assert_eq!(source.fetches().await, 1);

    scheduler.tick(at(9, 1, 0)).await;
    assert_eq!(source.fetches().await, 2);
}

/// Test that an event fires once inside its minute and never again
#[tokio::test]
async fn test_fires_once() {
    let notifier = RecordingNotifier::new();
    let mut scheduler = scheduler(MockEventSource::new(LISTING), notifier.clone());

    assert_eq!(scheduler.tick(at(9, 58, 50)).await, 0);
    assert_eq!(scheduler.tick(at(9, 59, 0)).await, 1);
    assert_eq!(scheduler.tick(at(9, 59, 10)).await, 0);
    assert_eq!(scheduler.tick(at(9, 59, 40)).await, 0);

    assert_eq!(notifier.titles().await, vec!["バイト (幸恵共有予定)"]);
    assert!(!scheduler
        .state()
        .contains(&CalendarEvent::new(at(10, 0, 0), "バイト (幸恵共有予定)")));
    assert_eq!(scheduler.state().events().len(), 1);
}

/// Test that events already under way do not fire
#[tokio::test]
async fn test_started_event_does_not_fire() {
    let notifier = RecordingNotifier::new();
    let mut scheduler = scheduler(MockEventSource::new(LISTING), notifier.clone());

    assert_eq!(scheduler.tick(at(10, 0, 1)).await, 0);
    assert!(notifier.titles().await.is_empty());
    // Still in the list, it is within the hour
    assert_eq!(scheduler.state().events().len(), 2);
}

/// Test that a fetch failure leaves no events and still counts as a refresh
#[tokio::test]
async fn test_fetch_failure_is_not_fatal() {
    let source = MockEventSource::failing();
    let mut scheduler = scheduler(source.clone(), RecordingNotifier::new());

    assert_eq!(scheduler.tick(at(9, 0, 0)).await, 0);
    assert!(scheduler.state().events().is_empty());
    assert_eq!(scheduler.state().last_refresh(), Some(at(9, 0, 0)));

    scheduler.tick(at(9, 0, 10)).await;
    assert_eq!(source.fetches().await, 1);

    source.set_listing(LISTING).await;
    scheduler.tick(at(9, 1, 0)).await;
    assert_eq!(scheduler.state().events().len(), 2);
}

/// Test that a failed reminder window is logged and the event still pruned
#[tokio::test]
async fn test_notify_failure_still_prunes() {
    let notifier = RecordingNotifier::failing();
    let mut scheduler = scheduler(MockEventSource::new(LISTING), notifier.clone());

    assert_eq!(scheduler.tick(at(16, 29, 30)).await, 1);
    assert_eq!(scheduler.tick(at(16, 29, 40)).await, 0);
    assert_eq!(notifier.titles().await.len(), 1);
}

/// Test that stale events never reach the active list
#[tokio::test]
async fn test_stale_listing_is_empty() {
    let mut scheduler = scheduler(
        MockEventSource::new("• 08:00 - 09:00: 過去のイベント"),
        RecordingNotifier::new(),
    );

    scheduler.tick(at(10, 0, 0)).await;
    assert!(scheduler.state().events().is_empty());
}

/// Test that duplicate listing entries produce a single reminder
#[tokio::test]
async fn test_duplicate_entries_fire_once() {
    let notifier = RecordingNotifier::new();
    let mut scheduler = scheduler(
        MockEventSource::new("• 会議\n    11:00 - 12:00\n• 会議\n    11:00 - 11:30"),
        notifier.clone(),
    );

    assert_eq!(scheduler.tick(at(10, 59, 30)).await, 1);
    assert_eq!(notifier.titles().await, vec!["会議"]);
    assert!(scheduler.state().events().is_empty());
}

/// Test that the run loop returns cleanly once shutdown is signalled
#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown() {
    let source = MockEventSource::new("");
    let mut scheduler = scheduler(source, RecordingNotifier::new());

    let (shutdown_send, shutdown_recv) = oneshot::channel();
    shutdown_send.send(()).unwrap();

    assert!(scheduler.run(shutdown_recv).await.is_ok());
}

/// Listing with one event starting within the next minute of the wall clock
fn listing_due_within_a_minute(title: &str) -> Option<String> {
    let now = Local::now().naive_local();
    let start = now + ChronoDuration::seconds(60);
    // The listing only covers today
    if start.date() != now.date() {
        return None;
    }
    Some(format!(
        "• {}\n    {}:{:02} - ...",
        title,
        start.hour(),
        start.minute()
    ))
}

/// Test that shutdown ends the loop while a reminder is still open
#[tokio::test]
async fn test_shutdown_while_reminder_open() {
    let Some(listing) = listing_due_within_a_minute("会議") else {
        return;
    };
    let notifier = RecordingNotifier::blocking();
    let mut scheduler = scheduler(MockEventSource::new(&listing), notifier.clone());

    let (shutdown_send, shutdown_recv) = oneshot::channel();
    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        let _ = shutdown_send.send(());
    });

    let result = timeout(Duration::from_secs(5), scheduler.run(shutdown_recv)).await;
    assert!(matches!(result, Ok(Ok(()))));
    assert_eq!(notifier.titles().await, vec!["会議"]);
}

/// Test that shutdown tears down a running reminder window process
#[cfg(unix)]
#[tokio::test]
async fn test_shutdown_kills_reminder_window() {
    // `sleep 1000` stands in for a window nobody closes
    let Some(listing) = listing_due_within_a_minute("1000") else {
        return;
    };
    let mut scheduler = ReminderScheduler::new(
        MockEventSource::new(&listing),
        ProcessNotifier::new("sleep"),
        &Config::default(),
    )
    .unwrap();

    let (shutdown_send, shutdown_recv) = oneshot::channel();
    tokio::spawn(async move {
        sleep(Duration::from_millis(500)).await;
        let _ = shutdown_send.send(());
    });

    let result = timeout(Duration::from_secs(5), scheduler.run(shutdown_recv)).await;
    assert!(matches!(result, Ok(Ok(()))));
}

/// Test that intervals too large for the scheduler are rejected, not panicked on
#[test]
fn test_oversized_interval_is_config_error() {
    let config = Config {
        stale_after_secs: i64::MAX,
        ..Default::default()
    };
    let result = ReminderScheduler::new(
        MockEventSource::new(LISTING),
        RecordingNotifier::new(),
        &config,
    );
    assert!(matches!(result, Err(Error::Config(_))));

    let config = Config {
        refresh_interval_secs: u64::MAX,
        ..Default::default()
    };
    let result = ReminderScheduler::new(
        MockEventSource::new(LISTING),
        RecordingNotifier::new(),
        &config,
    );
    assert!(matches!(result, Err(Error::Config(_))));
}
