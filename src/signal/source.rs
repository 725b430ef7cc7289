//! Source cancellation signal.
//!
//! # Responsibilities
//! - One-shot, broadcastable stop flag with a cause tag
//! - Wake async waiters on firing without blocking the firer
//! - Optional timer-backed firing, released explicitly or on drop
//!
//! # Design Decisions
//! - The firing cell is `OnceLock`: fired, cause and stamp are set together, first writer wins
//! - Every firing is stamped with a process-wide sequence number and the instant it happened
//! - The timer task holds a weak reference, so a pending timer never keeps a signal alive
//! - The mutex only guards the timer slot; firing and reading never take it

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::signal::cause::Cause;
use crate::signal::timer::{ScheduledFire, TimerTracker};

/// Errors raised by signal operations.
#[derive(Debug, Error)]
pub enum SignalError {
    /// `schedule_fire` was called outside a Tokio runtime.
    #[error("scheduling a timed fire requires a Tokio runtime")]
    NoRuntime,
}

static FIRE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// The record written by the first firing of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub cause: Cause,
    /// Position in the process-wide firing order.
    pub sequence: u64,
    /// Runtime clock reading at the firing.
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    firing: OnceLock<Firing>,
    waiters: Notify,
    timer: Mutex<Option<ScheduledFire>>,
    tracker: Option<TimerTracker>,
}

/// A one-shot cancellation signal.
///
/// Clones share the same state: firing any clone fires them all.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    inner: Arc<Inner>,
}

impl Signal {
    /// Create an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfired signal whose scheduled timers report to `tracker`.
    pub fn tracked(tracker: &TimerTracker) -> Self {
        Self {
            inner: Arc::new(Inner {
                tracker: Some(tracker.clone()),
                ..Inner::default()
            }),
        }
    }

    /// Fire the signal.
    ///
    /// Returns `true` if this call performed the transition. Firing an
    /// already fired signal is a no-op and keeps the original cause.
    pub fn fire(&self, cause: Cause) -> bool {
        if self.is_fired() {
            return false;
        }
        let firing = Firing {
            cause,
            at: Instant::now(),
            sequence: FIRE_SEQUENCE.fetch_add(1, Ordering::AcqRel),
        };
        if self.inner.firing.set(firing).is_err() {
            return false;
        }
        if let Some(firing) = self.inner.firing.get() {
            tracing::debug!(cause = %firing.cause, sequence = firing.sequence, "Signal fired");
        }
        self.inner.waiters.notify_waiters();
        true
    }

    /// Whether the signal has fired.
    pub fn is_fired(&self) -> bool {
        self.inner.firing.get().is_some()
    }

    /// The cause recorded by the first firing, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.firing().map(|firing| &firing.cause)
    }

    /// The full record of the first firing, if any.
    pub fn firing(&self) -> Option<&Firing> {
        self.inner.firing.get()
    }

    /// Wait until the signal fires.
    pub async fn fired(&self) {
        loop {
            let notified = self.inner.waiters.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_fired() {
                return;
            }
            notified.await;
        }
    }

    /// Arrange for `fire(cause)` to run once after `after` elapses.
    ///
    /// Re-scheduling replaces the pending timer. Scheduling on a fired
    /// signal does nothing.
    pub fn schedule_fire(&self, after: Duration, cause: Cause) -> Result<(), SignalError> {
        if self.is_fired() {
            return Ok(());
        }
        let runtime = Handle::try_current().map_err(|_| SignalError::NoRuntime)?;

        let deadline = Instant::now() + after;
        let target = Arc::downgrade(&self.inner);
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = target.upgrade() {
                Signal { inner }.fire(cause);
            }
        });

        let lease = self.inner.tracker.as_ref().map(TimerTracker::lease);
        let previous = self.timer_slot().replace(ScheduledFire::new(handle, after, lease));
        if previous.is_some() {
            tracing::trace!(after = ?after, "Replaced pending timer");
        } else {
            tracing::trace!(after = ?after, "Timer scheduled");
        }
        Ok(())
    }

    /// Delay of the pending timer, if one is scheduled and not released.
    pub fn scheduled_after(&self) -> Option<Duration> {
        self.timer_slot().as_ref().map(ScheduledFire::after)
    }

    /// Stop the pending timer and free it.
    ///
    /// Safe to call repeatedly and after the signal fired.
    pub fn release(&self) {
        let released = self.timer_slot().take();
        if let Some(scheduled) = released {
            tracing::trace!(after = ?scheduled.after(), fired = self.is_fired(), "Timer released");
        }
    }

    fn timer_slot(&self) -> MutexGuard<'_, Option<ScheduledFire>> {
        self.inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
