//! Outcome classification.
//!
//! # States
//! ```text
//! Running → Completed
//! Running → Stopped → CancelledByCaller | Disposed | TimedOut
//! ```
//!
//! # Priority
//! 1. Caller signal fired → `CancelledByCaller`
//! 2. Lifetime signal fired → `Disposed`
//! 3. Otherwise → `TimedOut`
//!
//! The client links parents in this same order, so the classifier and the
//! linked signal's tie-break always agree.

use std::time::Duration;

use crate::operation::RunStatus;
use crate::outcome::Outcome;
use crate::signal::{Cause, Snapshot};

/// Parent position of the caller signal in a client link.
pub const CALLER: usize = 0;
/// Parent position of the owner lifetime signal.
pub const LIFETIME: usize = 1;
/// Parent position of the per-call timeout signal.
pub const TIMEOUT: usize = 2;

/// Which of the three sources the stop is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub caller: Option<Cause>,
    pub lifetime: Option<Cause>,
    pub timeout: Option<Cause>,
}

impl Attribution {
    /// Read a snapshot taken from a `[caller, lifetime, timeout]` link.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            caller: snapshot.cause(CALLER).cloned(),
            lifetime: snapshot.cause(LIFETIME).cloned(),
            timeout: snapshot.cause(TIMEOUT).cloned(),
        }
    }
}

/// Map a run result and its attribution to the caller-visible outcome.
pub fn classify(status: RunStatus, attribution: &Attribution, timeout: Duration) -> Outcome {
    match status {
        RunStatus::Completed { steps } => Outcome::Completed { steps },
        RunStatus::Stopped { .. } => {
            if let Some(cause) = &attribution.caller {
                Outcome::CancelledByCaller {
                    cause: cause.clone(),
                }
            } else if attribution.lifetime.is_some() {
                Outcome::Disposed
            } else {
                Outcome::TimedOut { after: timeout }
            }
        }
    }
}
