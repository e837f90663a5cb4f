//! Cooperative shutdown flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Set once to ask the run loop to quit.
///
/// The loop checks the flag at the top of every iteration, so the chunk
/// being processed is always finished first. [`Shutdown::wait`] lets a
/// blocked read be interrupted.
#[derive(Debug, Default)]
pub struct Shutdown {
    requested: AtomicBool,
    notify: Notify,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake any waiters.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_requested() {
                return;
            }
            notified.await;
        }
    }

    /// Request shutdown on Ctrl-C.
    pub fn listen_for_ctrl_c(self: &Arc<Self>) -> JoinHandle<()> {
        let shutdown = Arc::clone(self);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, shutting down");
                    shutdown.request();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        })
    }
}
