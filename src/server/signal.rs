//! Shutdown signal handling.
//!
//! A single process-wide cancellation flag, set once by an interrupt. The
//! accept loop reads it to stop listening; in-flight request handlers are
//! never forcibly cancelled.

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::logger;

/// Cancellation signal shared between the signal task and the accept loop.
pub struct ShutdownSignal {
    notify: Notify,
    requested: AtomicBool,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notify: Notify::new(),
            requested: AtomicBool::new(false),
        }
    }

    /// Mark shutdown as requested and wake the accept loop.
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Wait until shutdown is requested. Returns immediately when the flag
    /// is already set.
    pub async fn wait(&self) {
        // Register interest before checking the flag so a trigger landing in
        // between cannot be missed.
        let mut notified = pin!(self.notify.notified());
        notified.as_mut().enable();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Register interrupt handlers on the current runtime.
///
/// SIGINT and SIGTERM on unix; Ctrl+C elsewhere. The first signal received
/// trips the shutdown flag.
#[cfg(unix)]
pub fn install(shutdown: Arc<ShutdownSignal>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        logger::log_shutdown_requested();
        shutdown.trigger();
    });

    Ok(())
}

/// Windows fallback - only handles Ctrl+C.
#[cfg(not(unix))]
pub fn install(shutdown: Arc<ShutdownSignal>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::log_shutdown_requested();
            shutdown.trigger();
        }
    });

    Ok(())
}
