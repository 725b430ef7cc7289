//! Operation execution subsystem.
//!
//! # Data Flow
//! ```text
//! StepPlan (step.rs) ─▶ Vec<Step> ─▶ runner.rs
//!
//! For each step:
//!     token fired? ─▶ Stopped { at_step }
//!     delay  (raced against the token)
//!     token fired? ─▶ Stopped { at_step }
//!     work(index)
//! All steps done ─▶ Completed { steps }
//! ```
//!
//! # Design Decisions
//! - The runner only reports "stopped"; attribution lives in `outcome`
//! - A step's work runs whole or not at all
//! - The delay is the only suspension point inside a step

pub mod runner;
pub mod step;

pub use runner::{run, RunStatus};
pub use step::{Step, StepPlan, Work};
