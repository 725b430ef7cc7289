//! Invocation outcomes.
//!
//! # Data Flow
//! ```text
//! RunStatus::Completed ───────────────────────────▶ Outcome::Completed
//! RunStatus::Stopped ─▶ classifier.rs (Snapshot) ─▶ CancelledByCaller | Disposed | TimedOut
//! Outcome::into_result ─▶ error.rs (StopError) for `?` propagation
//! ```
//!
//! # Design Decisions
//! - Exactly one outcome per invocation
//! - Priority: caller intent, then owner teardown, then timeout
//! - Classification is a pure function over a frozen snapshot

pub mod classifier;
pub mod error;

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::signal::Cause;

pub use classifier::{classify, Attribution};
pub use error::StopError;

/// What the caller gets back from one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every step ran.
    Completed { steps: usize },
    /// The caller's own signal fired; carries the caller's cause.
    CancelledByCaller { cause: Cause },
    /// The per-call deadline elapsed with no other cause.
    TimedOut { after: Duration },
    /// The owning client was disposed during the call.
    Disposed,
}

impl Outcome {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Completed { .. } => "completed",
            Outcome::CancelledByCaller { .. } => "cancelled_by_caller",
            Outcome::TimedOut { .. } => "timed_out",
            Outcome::Disposed => "disposed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    /// Turn a stop outcome into an error; `Completed` yields the step count.
    pub fn into_result(self) -> Result<usize, StopError> {
        match self {
            Outcome::Completed { steps } => Ok(steps),
            Outcome::CancelledByCaller { cause } => Err(StopError::CancelledByCaller { cause }),
            Outcome::TimedOut { after } => Err(StopError::TimedOut { after }),
            Outcome::Disposed => Err(StopError::Disposed),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed { steps } => write!(f, "completed {} steps", steps),
            Outcome::CancelledByCaller { cause } => write!(f, "cancelled by caller ({})", cause),
            Outcome::TimedOut { after } => write!(f, "timed out after {:?}", after),
            Outcome::Disposed => write!(f, "owner disposed"),
        }
    }
}
