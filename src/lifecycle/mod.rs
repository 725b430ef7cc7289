//! Host lifecycle management.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl+C received → Client::dispose → in-flight calls stop as Disposed
//! ```
//!
//! # Design Decisions
//! - Dispose is idempotent, so a second signal is harmless
//! - The watcher task is aborted by the host once it no longer needs it

pub mod shutdown;

pub use shutdown::dispose_on_ctrl_c;
