//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::operation::StepPlan;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Client settings (per-call timeout).
    pub client: ClientConfig,

    /// Step layout of the operation.
    pub steps: StepsConfig,

    /// Scripted triggers for the demo binary.
    pub demo: DemoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

/// Step layout.
///
/// With `delays_ms` set, each entry is one step. Otherwise the plan is
/// linear: `count` steps of `unit_ms * 1 ..= unit_ms * count`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StepsConfig {
    pub count: u32,
    pub unit_ms: u64,
    pub delays_ms: Option<Vec<u64>>,
}

impl StepsConfig {
    pub fn plan(&self) -> StepPlan {
        match &self.delays_ms {
            Some(delays) => StepPlan::fixed(delays.iter().copied().map(Duration::from_millis)),
            None => StepPlan::linear(self.count, Duration::from_millis(self.unit_ms)),
        }
    }
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            count: 10,
            unit_ms: 1_000,
            delays_ms: None,
        }
    }
}

/// Demo triggers. Both are off unless set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Fire the caller signal after this many milliseconds.
    pub cancel_after_ms: Option<u64>,

    /// Dispose the client after this many milliseconds.
    pub dispose_after_ms: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
