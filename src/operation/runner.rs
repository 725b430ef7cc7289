//! Step runner.
//!
//! # Responsibilities
//! - Execute steps strictly in order
//! - Check the token before each step and after each delay
//! - Abort on the first observed firing and report it

use serde::Serialize;

use crate::operation::step::Step;
use crate::signal::Token;

/// Result of running a step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every step ran.
    Completed { steps: usize },
    /// The token fired; `at_step` is the index of the step that did not finish.
    Stopped { at_step: usize },
}

impl RunStatus {
    pub fn is_stopped(&self) -> bool {
        matches!(self, RunStatus::Stopped { .. })
    }
}

/// Run `steps` while observing `token`.
pub async fn run(steps: &[Step], token: &Token) -> RunStatus {
    for (index, step) in steps.iter().enumerate() {
        if token.is_fired() {
            return stopped(index, token);
        }

        tokio::select! {
            biased;
            () = token.fired() => return stopped(index, token),
            () = tokio::time::sleep(step.delay) => {}
        }

        if token.is_fired() {
            return stopped(index, token);
        }

        step.execute(index);
        tracing::trace!(step = index, delay = ?step.delay, "Step completed");
    }

    RunStatus::Completed { steps: steps.len() }
}

fn stopped(index: usize, token: &Token) -> RunStatus {
    tracing::debug!(
        step = index,
        cause = ?token.cause(),
        "Operation stopped"
    );
    RunStatus::Stopped { at_step: index }
}
