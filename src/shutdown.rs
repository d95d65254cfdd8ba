use tokio::sync::oneshot;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Wait for a termination signal and tell the scheduler to stop
pub async fn handle_signals(shutdown_send: oneshot::Sender<()>) {
    match wait_for_signal().await {
        Ok(()) => {
            let _ = shutdown_send.send(());
        }
        Err(e) => {
            error!("Failed to install signal handlers: {}", e);
            // Keep the sender alive so the scheduler is not stopped by the drop
            std::future::pending::<()>().await;
        }
    }
}

/// Platform-specific signal handling implementation
#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, stopping calendar reminder");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, stopping calendar reminder");
        }
    }

    Ok(())
}

/// Platform-specific signal handling implementation
#[cfg(windows)]
async fn wait_for_signal() -> std::io::Result<()> {
    let mut ctrlc = ctrl_c()?;
    let mut ctrlbreak = ctrl_break()?;

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, stopping calendar reminder");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, stopping calendar reminder");
        }
    }

    Ok(())
}
