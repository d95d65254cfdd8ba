use super::state::ReminderState;
use crate::components::calendar::{EventParser, EventSource};
use crate::components::notifier::Notifier;
use crate::config::Config;
use crate::error::{config_error, ReminderResult};
use chrono::{Duration, Local, NaiveDateTime};
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{debug, error, info};

/// Where the scheduler is within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingRefresh,
    Refreshing,
    Scanning,
}

/// Polls the event source and fires reminders for events about to start
pub struct ReminderScheduler<S, N> {
    source: S,
    notifier: N,
    parser: EventParser,
    state: ReminderState,
    phase: Phase,
    refresh_interval: Duration,
    scan_interval: TokioDuration,
    lead_time: Duration,
}

impl<S: EventSource, N: Notifier> ReminderScheduler<S, N> {
    /// Build a scheduler, rejecting configs whose intervals cannot be represented
    pub fn new(source: S, notifier: N, config: &Config) -> ReminderResult<Self> {
        config.validate()?;

        Ok(Self {
            source,
            notifier,
            parser: EventParser::new(seconds("stale_after_secs", config.stale_after_secs)?),
            state: ReminderState::new(),
            phase: Phase::AwaitingRefresh,
            refresh_interval: seconds(
                "refresh_interval_secs",
                i64::try_from(config.refresh_interval_secs)
                    .map_err(|_| config_error("refresh_interval_secs is too large"))?,
            )?,
            scan_interval: TokioDuration::from_secs(config.scan_interval_secs),
            lead_time: seconds("lead_time_secs", config.lead_time_secs)?,
        })
    }

    pub fn state(&self) -> &ReminderState {
        &self.state
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Scheduler phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Run one refresh-and-scan pass at `now`, returning how many reminders fired
    pub async fn tick(&mut self, now: NaiveDateTime) -> usize {
        if self.state.needs_refresh(now, self.refresh_interval) {
            self.enter(Phase::Refreshing);
            self.refresh(now).await;
        }

        self.enter(Phase::Scanning);
        let fired = self.scan(now).await;

        self.enter(Phase::AwaitingRefresh);
        fired
    }

    async fn refresh(&mut self, now: NaiveDateTime) {
        info!("Refreshing events at {}", now.format("%H:%M:%S"));

        let events = match self.source.fetch_raw_listing().await {
            Ok(raw) => self.parser.parse(&raw, now),
            Err(e) => {
                error!("Failed to fetch calendar events: {}", e);
                Vec::new()
            }
        };
        self.state.replace(events, now);

        let upcoming = self.state.upcoming(now);
        if upcoming.is_empty() {
            info!("No upcoming events found today");
        } else {
            info!("Upcoming events:");
            for event in upcoming {
                info!("  {}", event);
            }
        }
    }

    async fn scan(&mut self, now: NaiveDateTime) -> usize {
        let mut fired = 0;

        for event in self.state.due(now, self.lead_time) {
            // Duplicate entries were already removed with the first one
            if !self.state.contains(&event) {
                continue;
            }

            info!("Event starting at {}: {}", event.start_time.format("%H:%M"), event.title);
            if let Err(e) = self.notifier.notify(&event.title).await {
                error!("Failed to show reminder for {:?}: {}", event.title, e);
            }

            self.state.remove(&event);
            fired += 1;
        }

        fired
    }

    /// Tick on the scan interval until `shutdown` fires
    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) -> ReminderResult<()> {
        info!("Reminder scheduler started");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Reminder scheduler stopped");
                    break;
                }
                _ = self.cycle() => {}
            }
        }

        Ok(())
    }

    async fn cycle(&mut self) {
        let now = Local::now().naive_local();
        self.tick(now).await;
        sleep(self.scan_interval).await;
    }
}

fn seconds(name: &str, secs: i64) -> ReminderResult<Duration> {
    Duration::try_seconds(secs).ok_or_else(|| config_error(&format!("{name} is out of range")))
}
