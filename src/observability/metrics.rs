//! Metrics collection.
//!
//! # Metrics
//! - `cancel_task_invocations_total` (counter): finished invocations by outcome
//! - `cancel_task_invocation_duration_seconds` (histogram): latency by outcome
//! - `cancel_task_rejected_total` (counter): calls refused after dispose

use tokio::time::Instant;

use crate::outcome::Outcome;

/// Record a finished invocation.
pub fn record_outcome(outcome: &Outcome, started: Instant) {
    let label = outcome.label();
    ::metrics::counter!("cancel_task_invocations_total", "outcome" => label).increment(1);
    ::metrics::histogram!("cancel_task_invocation_duration_seconds", "outcome" => label)
        .record(elapsed_seconds(started));
}

/// Seconds since `started` on the runtime clock.
fn elapsed_seconds(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}

/// Record a call refused because the client was disposed.
pub fn record_rejected() {
    ::metrics::counter!("cancel_task_rejected_total").increment(1);
}
