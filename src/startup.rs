use crate::components::{CommandSource, ProcessNotifier, ReminderScheduler};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the reminder configuration
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the scheduler and run it until a termination signal arrives
pub async fn start_reminder(config: Config) -> miette::Result<()> {
    let source = CommandSource::from_config(&config);
    let notifier = ProcessNotifier::from_config(&config)?;
    info!(
        "Watching `{} {}`, reminders open {}",
        config.calendar_command,
        config.calendar_args.join(" "),
        notifier.program().display()
    );

    let mut scheduler = ReminderScheduler::new(source, notifier, &config)?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send).await;
    });

    info!("Press Ctrl+C to stop");
    scheduler.run(shutdown_recv).await?;

    info!("Calendar reminder stopped");
    Ok(())
}
