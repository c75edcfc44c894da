//! Cooperative cancellation of a running simulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag that asks [`Sim::run`][crate::Sim::run] to return.
///
/// The flag is checked between steps only, so a stopped run always ends on a
/// committed state.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.  Safe to call from any thread, any number of times.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Clear a previous request so the same sim can be resumed.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
