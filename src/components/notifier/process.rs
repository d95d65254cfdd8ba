use super::Notifier;
use crate::config::Config;
use crate::error::{notify_error, ReminderResult};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Launches one reminder window process per event and waits for it to close
#[derive(Debug, Clone)]
pub struct ProcessNotifier {
    program: PathBuf,
}

impl ProcessNotifier {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &Config) -> ReminderResult<Self> {
        Ok(Self::new(config.notifier_program()?))
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

#[async_trait]
impl Notifier for ProcessNotifier {
    async fn notify(&self, title: &str) -> ReminderResult<()> {
        // Bare command names are resolved through PATH, paths must exist
        if self.program.components().count() > 1 && !self.program.exists() {
            return Err(notify_error(&format!(
                "Reminder window not found: {}",
                self.program.display()
            )));
        }

        debug!("Launching {} for {:?}", self.program.display(), title);

        let status = Command::new(&self.program)
            .arg(title)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                notify_error(&format!("Failed to launch {}: {}", self.program.display(), e))
            })?;

        if !status.success() {
            return Err(notify_error(&format!("Reminder window exited with {}", status)));
        }

        info!("Reminder for {:?} dismissed", title);
        Ok(())
    }
}
