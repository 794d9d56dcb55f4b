//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Resolve with the name of the first shutdown signal received.
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            Ok("ctrl_c")
        }
        result = terminate() => {
            result?;

            Ok("terminate")
        }
    }
}

/// Wait for a shutdown signal, then give in-flight requests `drain` to finish.
pub(crate) async fn listen(handle: ServerHandle, drain: Duration) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, drain_seconds = drain.as_secs(), "shutdown signal received");

    handle.stop_graceful(Some(drain));

    Ok(())
}
