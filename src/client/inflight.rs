//! Registry of in-flight invocations.

use std::time::Instant;

use dashmap::DashMap;
use uuid::Uuid;

/// Tracks invocations currently running against one client.
#[derive(Debug, Default)]
pub struct InFlight {
    calls: DashMap<Uuid, Instant>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` until the returned guard is dropped.
    pub fn register(&self, id: Uuid) -> Registration<'_> {
        self.calls.insert(id, Instant::now());
        Registration { registry: self, id }
    }

    /// Number of invocations in flight.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// IDs of the invocations in flight, oldest first.
    pub fn ids(&self) -> Vec<Uuid> {
        let mut calls: Vec<(Uuid, Instant)> =
            self.calls.iter().map(|entry| (*entry.key(), *entry.value())).collect();
        calls.sort_by_key(|(_, started)| *started);
        calls.into_iter().map(|(id, _)| id).collect()
    }
}

/// A RAII guard that keeps an invocation registered.
#[derive(Debug)]
pub struct Registration<'a> {
    registry: &'a InFlight,
    id: Uuid,
}

impl Registration<'_> {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.calls.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_lifecycle() {
        let registry = InFlight::new();
        assert!(registry.is_empty());

        let a = registry.register(Uuid::new_v4());
        let b = registry.register(Uuid::new_v4());
        assert_eq!(registry.len(), 2);
        assert!(registry.ids().contains(&a.id()));

        drop(a);
        assert_eq!(registry.ids(), vec![b.id()]);
        drop(b);
        assert!(registry.is_empty());
    }
}
