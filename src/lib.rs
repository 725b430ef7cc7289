//! Cancellation and timeout coordination for long-running operations.
//!
//! A [`Client`] runs a multi-step operation under three independent stop
//! sources: the caller's own signal, a per-call timeout, and the client's
//! lifetime (fired by [`Client::dispose`]). The sources are linked into one
//! signal for the runner, and every stop is attributed back to exactly one
//! [`Outcome`].

pub mod client;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod operation;
pub mod outcome;
pub mod signal;

pub use client::{Client, ClientError, InvokeError};
pub use config::AppConfig;
pub use outcome::{Outcome, StopError};
pub use signal::{Cause, Signal};
