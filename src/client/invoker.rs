//! The lifetime-owning client.
//!
//! # Responsibilities
//! - Own a lifetime signal fired exactly once by `dispose`
//! - Per call: create a timeout, link it with the lifetime and caller signals
//! - Run the operation, classify the stop, release the timeout on every path
//! - Reject calls made after `dispose`

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use uuid::Uuid;

use crate::client::inflight::InFlight;
use crate::config::AppConfig;
use crate::observability::metrics;
use crate::operation::{self, Step, StepPlan};
use crate::outcome::{classify, Attribution, Outcome, StopError};
use crate::signal::{Cause, LinkedSignal, Signal, SignalError, TimerTracker, Token};

/// Errors raised before an invocation can start.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client was disposed before the call.
    #[error("client has been disposed")]
    Disposed,

    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// Any way `Client::send` can fail.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Stopped(#[from] StopError),
}

/// Runs a multi-step operation under a per-call timeout and an owner lifetime.
#[derive(Debug)]
pub struct Client {
    timeout: Duration,
    steps: Arc<[Step]>,
    lifetime: Signal,
    timers: TimerTracker,
    in_flight: InFlight,
}

impl Client {
    /// Create a client with the default step plan.
    pub fn new(timeout: Duration) -> Self {
        Self::with_steps(timeout, StepPlan::default().steps())
    }

    /// Create a client running the given steps on every call.
    pub fn with_steps(timeout: Duration, steps: Vec<Step>) -> Self {
        Self {
            timeout,
            steps: steps.into(),
            lifetime: Signal::new(),
            timers: TimerTracker::new(),
            in_flight: InFlight::new(),
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_steps(config.client.timeout(), config.steps.plan().steps())
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether `dispose` has run.
    pub fn is_disposed(&self) -> bool {
        self.lifetime.is_fired()
    }

    /// Scheduled timers not yet released.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// The lifetime signal shared by every invocation.
    ///
    /// Fired with [`Cause::Disposed`] by `dispose` or when the client drops.
    pub fn lifetime(&self) -> &Signal {
        &self.lifetime
    }

    /// Invocations currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Run the operation once.
    ///
    /// `caller` defaults to a signal that never fires. Fails with
    /// [`ClientError::Disposed`] if the client was already disposed.
    pub async fn invoke(&self, caller: Option<&Signal>) -> Result<Outcome, ClientError> {
        if self.is_disposed() {
            tracing::warn!("Invocation rejected: client disposed");
            metrics::record_rejected();
            return Err(ClientError::Disposed);
        }

        let never = Signal::new();
        let caller = caller.unwrap_or(&never);
        let registration = self.in_flight.register(Uuid::new_v4());
        let invocation_id = registration.id();
        let started = Instant::now();

        // Link order is the classification priority.
        let linked = LinkedSignal::builder()
            .parent(caller)
            .parent(&self.lifetime)
            .timeout(self.timeout, &self.timers)?
            .build();
        let _timeout = linked.release_on_drop();

        tracing::debug!(
            invocation_id = %invocation_id,
            timeout = ?self.timeout,
            steps = self.steps.len(),
            "Invocation started"
        );

        let status = operation::run(&self.steps, &Token::from(linked.clone())).await;
        let attribution = linked
            .snapshot()
            .map(Attribution::from_snapshot)
            .unwrap_or_default();
        let outcome = classify(status, &attribution, self.timeout);

        metrics::record_outcome(&outcome, started);
        tracing::info!(
            invocation_id = %invocation_id,
            outcome = outcome.label(),
            elapsed = ?started.elapsed(),
            "Invocation finished"
        );
        Ok(outcome)
    }

    /// Run the operation once, surfacing any stop as an error.
    ///
    /// Returns the number of completed steps.
    pub async fn send(&self, caller: Option<&Signal>) -> Result<usize, InvokeError> {
        let steps = self.invoke(caller).await?.into_result()?;
        Ok(steps)
    }

    /// Fire the lifetime signal and release it. Idempotent.
    pub fn dispose(&self) {
        if self.lifetime.fire(Cause::Disposed) {
            tracing::info!(
                in_flight = self.in_flight.len(),
                interrupted = ?self.in_flight.ids(),
                "Client disposed"
            );
        }
        self.lifetime.release();
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_within_timeout() {
        let client = Client::with_steps(secs(100), StepPlan::fixed([secs(1), secs(1), secs(1)]).steps());
        let outcome = client.invoke(None).await.unwrap();
        assert_eq!(outcome, Outcome::Completed { steps: 3 });
        assert_eq!(client.pending_timers(), 0);
        assert_eq!(client.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invoke_after_dispose_is_rejected() {
        let client = Client::new(secs(5));
        client.dispose();
        client.dispose();
        assert!(client.is_disposed());

        let result = client.invoke(None).await;
        assert!(matches!(result, Err(ClientError::Disposed)));
        assert_eq!(client.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_maps_timeout_to_error() {
        let client = Client::new(secs(5));
        let err = client.send(None).await.unwrap_err();
        match err {
            InvokeError::Stopped(stop) => assert!(stop.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_returns_step_count() {
        let client = Client::with_steps(secs(10), StepPlan::linear(2, secs(1)).steps());
        assert_eq!(client.send(None).await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_disposes_running_work() {
        let client = Client::new(secs(5));
        let lifetime = client.lifetime().clone();
        let steps = StepPlan::linear(3, secs(1)).steps();

        let running = tokio::spawn(async move {
            let linked = LinkedSignal::link([lifetime.clone()]);
            let status = operation::run(&steps, &Token::from(linked)).await;
            (status, lifetime.cause().cloned())
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(client);

        let (status, cause) = running.await.unwrap();
        assert_eq!(status, operation::RunStatus::Stopped { at_step: 1 });
        assert_eq!(cause, Some(Cause::Disposed));
    }

    #[test]
    fn test_from_config_uses_timeout() {
        let mut config = AppConfig::default();
        config.client.timeout_ms = 250;
        let client = Client::from_config(&config);
        assert_eq!(client.timeout(), Duration::from_millis(250));
        assert!(!client.is_disposed());
    }
}
