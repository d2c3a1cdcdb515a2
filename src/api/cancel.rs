//! Cooperative cancellation for long-running walks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared flag checked between pages, probes and polls.
///
/// Clones share the same flag. Cancelling never interrupts a request that
/// is already in flight; the next check stops the walk.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
