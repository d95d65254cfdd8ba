use crate::config::Config;
use crate::error::{calendar_source_error, ReminderResult};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Anything that can produce today's raw event listing
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the raw text listing, an empty string means no events
    async fn fetch_raw_listing(&self) -> ReminderResult<String>;
}

/// Event source backed by a calendar command line tool such as icalBuddy
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.calendar_command.clone(), config.calendar_args.clone())
    }
}

#[async_trait]
impl EventSource for CommandSource {
    async fn fetch_raw_listing(&self) -> ReminderResult<String> {
        debug!("Running {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| calendar_source_error(&format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(calendar_source_error(&format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
