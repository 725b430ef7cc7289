//! Scheduled-fire bookkeeping.
//!
//! # Responsibilities
//! - Own the task handle behind a timer-backed signal
//! - Abort the task when the timer is released
//! - Count scheduled timers that have not been released yet

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Counts timers that were scheduled and not yet released.
///
/// Cloning shares the counter, so a client and all the timeout signals it
/// creates report into the same tally.
#[derive(Debug, Clone, Default)]
pub struct TimerTracker {
    pending: Arc<AtomicUsize>,
}

impl TimerTracker {
    /// Create a tracker with no outstanding timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled timers still holding a lease.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    pub(crate) fn lease(&self) -> TimerLease {
        self.pending.fetch_add(1, Ordering::AcqRel);
        TimerLease {
            pending: self.pending.clone(),
        }
    }
}

/// A RAII lease that keeps a timer counted until it is dropped.
#[derive(Debug)]
pub(crate) struct TimerLease {
    pending: Arc<AtomicUsize>,
}

impl Drop for TimerLease {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A pending fire: the sleeping task plus its optional lease.
///
/// Dropping it aborts the task, whether or not it already ran.
#[derive(Debug)]
pub(crate) struct ScheduledFire {
    handle: JoinHandle<()>,
    after: Duration,
    _lease: Option<TimerLease>,
}

impl ScheduledFire {
    pub(crate) fn new(handle: JoinHandle<()>, after: Duration, lease: Option<TimerLease>) -> Self {
        Self {
            handle,
            after,
            _lease: lease,
        }
    }

    pub(crate) fn after(&self) -> Duration {
        self.after
    }
}

impl Drop for ScheduledFire {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
