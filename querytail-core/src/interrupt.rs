use tokio_util::sync::CancellationToken;

/// Returns a token cancelled on the first SIGINT (or SIGTERM on unix).
///
/// Must be called from within a tokio runtime; the listener task is the only
/// background task a search uses.
pub fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();

    tokio::spawn({
        let token = token.clone();
        async move {
            match wait_for_interrupt().await {
                Ok(signal) => tracing::info!(signal, "interrupt received, cancelling search"),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to listen for interrupts");
                    return;
                }
            }
            token.cancel();
        }
    });

    token
}

#[cfg(unix)]
async fn wait_for_interrupt() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate())?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_interrupt() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
}
