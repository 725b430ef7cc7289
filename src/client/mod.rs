//! Client subsystem.
//!
//! # Data Flow
//! ```text
//! invoke(caller)
//!     → reject if disposed
//!     → inflight.rs (register invocation id)
//!     → link [caller, lifetime, timeout(duration)]
//!     → operation::run
//!     → outcome::classify (linked snapshot)
//!     → release timeout, unregister
//!
//! dispose()
//!     → fire lifetime (Disposed) → every in-flight call stops at its next check
//! ```
//!
//! # Design Decisions
//! - The lifetime signal is shared by all calls; each timeout belongs to one call
//! - Timeout release is scoped to the call, so no exit path leaks a timer
//! - Calls after dispose fail fast instead of running and stopping at once

pub mod inflight;
pub mod invoker;

pub use inflight::InFlight;
pub use invoker::{Client, ClientError, InvokeError};
