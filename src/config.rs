use crate::error::{config_error, ReminderResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/reminder.toml";

/// Default calendar listing command
pub const DEFAULT_CALENDAR_COMMAND: &str = "icalBuddy";

/// Name of the window binary installed next to the reminder binary
pub const WINDOW_BINARY: &str = "reminder_window";

/// Default font used by the reminder window, looked up relative to the working directory
pub const DEFAULT_FONT_PATH: &str = "NotoSansJP-VariableFont_wght.ttf";

/// Upper bound for every interval setting, one day
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Main configuration structure for the reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program listing today's calendar events
    pub calendar_command: String,
    /// Arguments passed to the calendar program
    pub calendar_args: Vec<String>,
    /// Program launched for each reminder, receiving the event title as its only argument
    pub notifier_command: Option<String>,
    /// Seconds between full refreshes of today's events
    pub refresh_interval_secs: u64,
    /// Seconds between scans for events about to start
    pub scan_interval_secs: u64,
    /// How far ahead of its start an event fires, in seconds
    pub lead_time_secs: i64,
    /// Events that started longer ago than this are dropped while parsing
    pub stale_after_secs: i64,
    /// Font file the reminder window renders the title with
    pub font_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar_command: DEFAULT_CALENDAR_COMMAND.to_string(),
            calendar_args: vec!["eventsToday".to_string()],
            notifier_command: None,
            refresh_interval_secs: 60,
            scan_interval_secs: 10,
            lead_time_secs: 60,
            stale_after_secs: 3600,
            font_path: DEFAULT_FONT_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment and the optional config file
    pub fn load() -> ReminderResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let path = env::var("REMINDER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(command) = env::var("REMINDER_CALENDAR_COMMAND") {
            config.calendar_command = command;
        }
        if let Ok(command) = env::var("REMINDER_NOTIFIER_COMMAND") {
            config.notifier_command = Some(command);
        }
        if let Ok(font) = env::var("REMINDER_FONT_PATH") {
            config.font_path = font;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file, missing keys fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> ReminderResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject values the scheduler cannot run with
    pub fn validate(&self) -> ReminderResult<()> {
        if self.calendar_command.trim().is_empty() {
            return Err(config_error("calendar_command must not be empty"));
        }
        if self.refresh_interval_secs == 0 {
            return Err(config_error("refresh_interval_secs must be positive"));
        }
        if self.scan_interval_secs == 0 {
            return Err(config_error("scan_interval_secs must be positive"));
        }
        if self.lead_time_secs < 0 {
            return Err(config_error("lead_time_secs must not be negative"));
        }
        if self.stale_after_secs < 0 {
            return Err(config_error("stale_after_secs must not be negative"));
        }

        let intervals = [
            ("refresh_interval_secs", self.refresh_interval_secs),
            ("scan_interval_secs", self.scan_interval_secs),
            ("lead_time_secs", self.lead_time_secs as u64),
            ("stale_after_secs", self.stale_after_secs as u64),
        ];
        for (name, secs) in intervals {
            if secs > MAX_INTERVAL_SECS {
                return Err(config_error(&format!(
                    "{name} must be at most {MAX_INTERVAL_SECS} seconds"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the program launched for each reminder
    pub fn notifier_program(&self) -> ReminderResult<PathBuf> {
        if let Some(command) = &self.notifier_command {
            return Ok(PathBuf::from(command));
        }

        let exe = env::current_exe()?;
        Ok(exe.with_file_name(format!("{}{}", WINDOW_BINARY, env::consts::EXE_SUFFIX)))
    }
}
