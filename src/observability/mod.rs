//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! signal, operation, client:
//!     → tracing events (structured fields: invocation_id, cause, step)
//!     → metrics.rs (outcome counters, invocation latency)
//!
//! Binary:
//!     → logging.rs installs the subscriber
//! ```
//!
//! # Design Decisions
//! - The library only emits; the host decides where logs and metrics go
//! - Metric updates go through the `metrics` facade, no exporter is bundled

pub mod logging;
pub mod metrics;
