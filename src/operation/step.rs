//! Step definitions and step plans.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Unit of work run at the end of a step. Receives the step index.
pub type Work = Arc<dyn Fn(usize) + Send + Sync>;

/// A single step: wait for `delay`, then run the optional work.
#[derive(Clone)]
pub struct Step {
    pub delay: Duration,
    pub work: Option<Work>,
}

impl Step {
    /// A step that only waits.
    pub fn delay(delay: Duration) -> Self {
        Self { delay, work: None }
    }

    /// A step that waits, then runs `work`.
    pub fn with_work<F>(delay: Duration, work: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        Self {
            delay,
            work: Some(Arc::new(work)),
        }
    }

    pub(crate) fn execute(&self, index: usize) {
        if let Some(work) = &self.work {
            work(index);
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("delay", &self.delay)
            .field("has_work", &self.work.is_some())
            .finish()
    }
}

/// How to lay out the delays of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPlan {
    /// `count` steps of `unit * 1`, `unit * 2`, ... `unit * count`.
    Linear { count: u32, unit: Duration },
    /// One step per listed delay.
    Fixed(Vec<Duration>),
}

impl StepPlan {
    pub fn linear(count: u32, unit: Duration) -> Self {
        StepPlan::Linear { count, unit }
    }

    pub fn fixed<I>(delays: I) -> Self
    where
        I: IntoIterator<Item = Duration>,
    {
        StepPlan::Fixed(delays.into_iter().collect())
    }

    /// Materialize the plan into delay-only steps.
    pub fn steps(&self) -> Vec<Step> {
        match self {
            StepPlan::Linear { count, unit } => {
                (1..=*count).map(|n| Step::delay(unit.saturating_mul(n))).collect()
            }
            StepPlan::Fixed(delays) => delays.iter().copied().map(Step::delay).collect(),
        }
    }

    /// Sum of all step delays.
    pub fn total(&self) -> Duration {
        self.steps()
            .iter()
            .fold(Duration::ZERO, |acc, step| acc.saturating_add(step.delay))
    }
}

impl Default for StepPlan {
    /// Ten steps growing by one second each.
    fn default() -> Self {
        StepPlan::linear(10, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_linear_plan_grows() {
        let steps = StepPlan::linear(3, Duration::from_millis(100)).steps();
        let delays: Vec<_> = steps.iter().map(|s| s.delay.as_millis()).collect();
        assert_eq!(delays, vec![100, 200, 300]);
    }

    #[test]
    fn test_default_plan_totals_55_seconds() {
        let plan = StepPlan::default();
        assert_eq!(plan.steps().len(), 10);
        assert_eq!(plan.total(), Duration::from_secs(55));
    }

    #[test]
    fn test_fixed_plan_keeps_order() {
        let plan = StepPlan::fixed([Duration::from_secs(2), Duration::from_secs(1)]);
        let delays: Vec<_> = plan.steps().iter().map(|s| s.delay).collect();
        assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(1)]);
        assert_eq!(plan.total(), Duration::from_secs(3));
    }

    #[test]
    fn test_step_fields_are_public() {
        let step = Step {
            delay: Duration::from_millis(5),
            work: Some(Arc::new(|_| {})),
        };
        assert!(step.work.is_some());
        assert!(Step::delay(step.delay).work.is_none());
    }

    #[test]
    fn test_execute_runs_work_with_index() {
        let seen = Arc::new(AtomicUsize::new(0));
        let s = seen.clone();
        let step = Step::with_work(Duration::ZERO, move |index| {
            s.store(index + 1, Ordering::SeqCst);
        });
        step.execute(4);
        assert_eq!(seen.load(Ordering::SeqCst), 5);

        // Delay-only steps do nothing.
        Step::delay(Duration::ZERO).execute(0);
    }
}
