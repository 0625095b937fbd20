//! Cooperative cancellation for a running search.
//!
//! The search itself is single-threaded; the signal exists so another thread
//! (a protocol loop reading `stop`, a Ctrl-C handler) can ask it to wrap up.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Thread-safe flag telling a search to return at the next sibling boundary.
///
/// Cheaply cloneable; all clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every search holding a clone of this signal to stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Clear the flag so the signal can be reused for the next search.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Fast atomic load, suitable for calling at every node.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "stop_tests.rs"]
mod stop_tests;
