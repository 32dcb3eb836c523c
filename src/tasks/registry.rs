//! Live timer accounting

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Counts ticker tasks that are still alive
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    active: Arc<AtomicUsize>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticker tasks currently alive
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Register a timer. The count drops when the guard does.
    pub(crate) fn register(&self) -> TimerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        TimerGuard {
            active: Arc::clone(&self.active),
        }
    }
}

/// Registration held by a running ticker task
#[derive(Debug)]
pub(crate) struct TimerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
