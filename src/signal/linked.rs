//! Linked signal composition.
//!
//! A [`LinkedSignal`] fires as soon as any of its parents fires. Parents are
//! shared, not owned: they never learn that a linked signal observes them.
//! The one exception is a timeout created through [`LinkBuilder::timeout`],
//! which belongs to the linked signal and is released with it.
//!
//! Attribution follows the firing stamps, not the moment a firing is
//! observed. The [`Snapshot`] holds the earliest firing among the parents
//! plus any parent that fired in the same clock tick; a parent stamped in a
//! later tick is left out even if it had already fired when the snapshot was
//! taken. Within the tick, the earliest parent in link order is the trigger.
//! The snapshot is frozen on first capture and shared by every observer.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use futures_util::future::select_all;

use crate::signal::cause::Cause;
use crate::signal::source::{Signal, SignalError};
use crate::signal::timer::TimerTracker;

/// Parent causes attributed to a linked signal's firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    causes: Vec<Option<Cause>>,
}

impl Snapshot {
    /// Keep the first firing (by sequence) and the parents fired in its tick.
    fn capture(parents: &[Signal]) -> Option<Self> {
        let first = parents
            .iter()
            .filter_map(Signal::firing)
            .min_by_key(|firing| firing.sequence)?;
        let tick = first.at;

        let causes = parents
            .iter()
            .map(|parent| {
                parent
                    .firing()
                    .filter(|firing| firing.at == tick)
                    .map(|firing| firing.cause.clone())
            })
            .collect();
        Some(Self { causes })
    }

    /// Cause of the parent at `index`, if it is part of the attribution.
    pub fn cause(&self, index: usize) -> Option<&Cause> {
        self.causes.get(index).and_then(Option::as_ref)
    }

    /// Whether the parent at `index` is part of the attribution.
    pub fn is_fired(&self, index: usize) -> bool {
        self.cause(index).is_some()
    }

    /// The attributed trigger: the earliest fired parent in link order.
    pub fn trigger(&self) -> Option<(usize, &Cause)> {
        self.causes
            .iter()
            .enumerate()
            .find_map(|(index, cause)| cause.as_ref().map(|c| (index, c)))
    }

    /// Number of parents covered.
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}

#[derive(Debug)]
struct Inner {
    parents: Vec<Signal>,
    owned_timeout: Option<Signal>,
    snapshot: OnceLock<Snapshot>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(timeout) = &self.owned_timeout {
            timeout.release();
        }
    }
}

/// A signal derived from an ordered list of parent signals.
#[derive(Debug, Clone)]
pub struct LinkedSignal {
    inner: Arc<Inner>,
}

impl LinkedSignal {
    /// Link the given parents, in order.
    pub fn link<I>(parents: I) -> Self
    where
        I: IntoIterator<Item = Signal>,
    {
        Self::from_parts(parents.into_iter().collect(), None)
    }

    /// Start building a linked signal.
    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    fn from_parts(parents: Vec<Signal>, owned_timeout: Option<Signal>) -> Self {
        Self {
            inner: Arc::new(Inner {
                parents,
                owned_timeout,
                snapshot: OnceLock::new(),
            }),
        }
    }

    /// Parents in link order, including an owned timeout as the last entry.
    pub fn parents(&self) -> &[Signal] {
        &self.inner.parents
    }

    /// The timeout signal owned by this link, if any.
    pub fn timeout_signal(&self) -> Option<&Signal> {
        self.inner.owned_timeout.as_ref()
    }

    /// Whether any parent has fired.
    pub fn is_fired(&self) -> bool {
        self.snapshot().is_some()
    }

    /// The attribution snapshot, once any parent has fired.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        if let Some(snapshot) = self.inner.snapshot.get() {
            return Some(snapshot);
        }
        let captured = Snapshot::capture(&self.inner.parents)?;
        Some(self.inner.snapshot.get_or_init(|| captured))
    }

    /// Cause of the attributed trigger.
    pub fn cause(&self) -> Option<&Cause> {
        self.snapshot()
            .and_then(Snapshot::trigger)
            .map(|(_, cause)| cause)
    }

    /// Wait until any parent fires.
    pub async fn fired(&self) {
        if self.is_fired() {
            return;
        }
        if self.inner.parents.is_empty() {
            std::future::pending::<()>().await;
        }

        let waits = self.inner.parents.iter().map(|p| Box::pin(p.fired()));
        select_all(waits).await;
        self.snapshot();
    }

    /// Release the owned timeout's pending timer.
    pub fn release(&self) {
        if let Some(timeout) = &self.inner.owned_timeout {
            timeout.release();
        }
    }

    /// Release the owned timeout when the returned guard goes out of scope.
    pub fn release_on_drop(&self) -> ReleaseGuard<'_> {
        ReleaseGuard { linked: self }
    }
}

/// A RAII guard that releases a linked signal's owned timeout.
#[derive(Debug)]
pub struct ReleaseGuard<'a> {
    linked: &'a LinkedSignal,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.linked.release();
    }
}

/// Builder for [`LinkedSignal`].
#[derive(Debug, Default)]
pub struct LinkBuilder {
    parents: Vec<Signal>,
    timeout: Option<Signal>,
}

impl LinkBuilder {
    /// Append a shared parent.
    pub fn parent(mut self, signal: &Signal) -> Self {
        self.parents.push(signal.clone());
        self
    }

    /// Create an owned timeout that fires with [`Cause::Timeout`] after `after`.
    ///
    /// The timeout is always linked last. Calling this twice replaces the
    /// first timeout.
    pub fn timeout(mut self, after: Duration, tracker: &TimerTracker) -> Result<Self, SignalError> {
        let timeout = Signal::tracked(tracker);
        timeout.schedule_fire(after, Cause::Timeout)?;
        if let Some(previous) = self.timeout.replace(timeout) {
            previous.release();
        }
        Ok(self)
    }

    pub fn build(self) -> LinkedSignal {
        let mut parents = self.parents;
        if let Some(timeout) = &self.timeout {
            parents.push(timeout.clone());
        }
        LinkedSignal::from_parts(parents, self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_any_parent_fires() {
        let a = Signal::new();
        let b = Signal::new();
        let linked = LinkedSignal::link([a.clone(), b.clone()]);
        assert!(!linked.is_fired());
        assert!(linked.snapshot().is_none());

        b.fire(Cause::External);
        assert!(linked.is_fired());
        assert_eq!(linked.cause(), Some(&Cause::External));
        assert_eq!(linked.snapshot().unwrap().trigger().unwrap().0, 1);
    }

    #[test]
    fn test_late_parent_does_not_change_attribution() {
        let caller = Signal::new();
        let timeout = Signal::new();
        let linked = LinkedSignal::link([caller.clone(), timeout.clone()]);

        timeout.fire(Cause::Timeout);
        assert!(linked.is_fired());

        // Caller fires after the trigger was observed.
        caller.fire(Cause::External);
        let snapshot = linked.snapshot().unwrap();
        assert!(!snapshot.is_fired(0));
        assert!(snapshot.is_fired(1));
        assert_eq!(snapshot.trigger(), Some((1, &Cause::Timeout)));
    }

    #[test]
    fn test_later_firing_excluded_even_before_observation() {
        let caller = Signal::new();
        let timeout = Signal::new();
        let linked = LinkedSignal::link([caller.clone(), timeout.clone()]);

        timeout.fire(Cause::Timeout);
        std::thread::sleep(Duration::from_millis(5));
        caller.fire(Cause::External);

        // Nobody looked until both had fired.
        let snapshot = linked.snapshot().unwrap();
        assert!(!snapshot.is_fired(0));
        assert_eq!(snapshot.trigger(), Some((1, &Cause::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tie_goes_to_earliest_parent() {
        let first = Signal::new();
        let second = Signal::new();
        let linked = LinkedSignal::link([first.clone(), second.clone()]);

        second.fire(Cause::Timeout);
        first.fire(Cause::External);

        let snapshot = linked.snapshot().unwrap();
        assert!(snapshot.is_fired(0));
        assert!(snapshot.is_fired(1));
        assert_eq!(snapshot.trigger(), Some((0, &Cause::External)));
    }

    #[test]
    fn test_no_parents_never_fires() {
        let linked = LinkedSignal::link(Vec::new());
        assert!(!linked.is_fired());
        assert!(linked.cause().is_none());
    }

    #[test]
    fn test_clones_share_snapshot() {
        let a = Signal::new();
        let linked = LinkedSignal::link([a.clone()]);
        let observer = linked.clone();

        a.fire(Cause::custom("first"));
        assert_eq!(observer.snapshot(), linked.snapshot());
        assert_eq!(observer.snapshot().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fired_wakes_on_any_parent() {
        let a = Signal::new();
        let b = Signal::new();
        let linked = LinkedSignal::link([a.clone(), b.clone()]);
        let waiter = linked.clone();

        let task = tokio::spawn(async move {
            waiter.fired().await;
            waiter.cause().cloned()
        });

        tokio::task::yield_now().await;
        b.fire(Cause::Disposed);
        assert_eq!(task.await.unwrap(), Some(Cause::Disposed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_owned_timeout_linked_last() {
        let tracker = TimerTracker::new();
        let caller = Signal::new();
        let linked = LinkedSignal::builder()
            .parent(&caller)
            .timeout(Duration::from_secs(5), &tracker)
            .unwrap()
            .build();

        assert_eq!(linked.parents().len(), 2);
        assert!(linked.timeout_signal().is_some());
        assert_eq!(tracker.pending(), 1);

        linked.fired().await;
        assert_eq!(linked.snapshot().unwrap().trigger(), Some((1, &Cause::Timeout)));

        linked.release();
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_timeout_is_released() {
        let tracker = TimerTracker::new();
        let linked = LinkedSignal::builder()
            .timeout(Duration::from_secs(1), &tracker)
            .unwrap()
            .timeout(Duration::from_secs(2), &tracker)
            .unwrap()
            .build();

        assert_eq!(tracker.pending(), 1);
        assert_eq!(linked.parents().len(), 1);
        assert_eq!(
            linked.timeout_signal().and_then(Signal::scheduled_after),
            Some(Duration::from_secs(2))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_guard_and_drop_release_timeout() {
        let tracker = TimerTracker::new();
        let linked = LinkedSignal::builder()
            .timeout(Duration::from_secs(5), &tracker)
            .unwrap()
            .build();
        {
            let _guard = linked.release_on_drop();
            assert_eq!(tracker.pending(), 1);
        }
        assert_eq!(tracker.pending(), 0);

        let dropped = LinkedSignal::builder()
            .timeout(Duration::from_secs(5), &tracker)
            .unwrap()
            .build();
        assert_eq!(tracker.pending(), 1);
        drop(dropped);
        assert_eq!(tracker.pending(), 0);
    }
}
