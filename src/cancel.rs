use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Shared, single-fire cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Route Ctrl-C / SIGINT to `token.cancel()`.
pub fn install_ctrlc_handler(token: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        if token.cancel() {
            info!(
                action = "cancel",
                component = "signal",
                "Interrupt received, stopping tailers at next line boundary"
            );
        }
    })
    .context("Failed to install Ctrl-C handler")?;

    Ok(())
}
