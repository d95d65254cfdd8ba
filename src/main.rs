use calendar_reminder::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting calendar reminder");

    // Load configuration
    let config = startup::load_config()?;

    // Poll until interrupted
    startup::start_reminder(config).await
}
