//! Error form of a stop outcome.

use std::time::Duration;

use thiserror::Error;

use crate::signal::Cause;

/// Why an invocation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopError {
    /// The caller's own signal fired.
    #[error("operation cancelled by caller ({cause})")]
    CancelledByCaller { cause: Cause },

    /// The per-call timeout elapsed.
    #[error("operation timed out after {after:?}")]
    TimedOut { after: Duration },

    /// The owner was disposed while the call was in flight.
    #[error("owner disposed while the operation was in flight")]
    Disposed,
}

impl StopError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StopError::TimedOut { .. })
    }
}
