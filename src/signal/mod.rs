//! Cancellation signal subsystem.
//!
//! # Data Flow
//! ```text
//! Source signals (source.rs):
//!     fire(cause) ─┬─▶ write-once firing cell: cause + sequence + instant
//!                  └─▶ wake every waiter (never blocks the firer)
//!     schedule_fire(after) ─▶ timer task (timer.rs lease) ─▶ fire(cause)
//!
//! Linked signals (linked.rs):
//!     [caller, lifetime, timeout] ─▶ earliest firing (by sequence) and its tick
//!                                 ─▶ Snapshot of parents fired in that tick, frozen once
//!                                 ─▶ runner and classifier read the same Snapshot
//!
//! Token (token.rs):
//!     Source(Signal) | Linked(LinkedSignal) ─▶ observed by the operation runner
//! ```
//!
//! # Design Decisions
//! - Signals are write-once, read-many; the fired flag and the cause are one cell
//! - Parents never learn about the linked signals derived from them
//! - Every scheduled timer holds a lease so outstanding timers can be counted
//! - Attribution follows firing order, never the order firings were observed in

pub mod cause;
pub mod linked;
pub mod source;
pub mod timer;
pub mod token;

pub use cause::Cause;
pub use linked::{LinkBuilder, LinkedSignal, ReleaseGuard, Snapshot};
pub use source::{Firing, Signal, SignalError};
pub use timer::TimerTracker;
pub use token::Token;
