//! Cause tags recorded when a signal fires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a signal fired.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tag")]
pub enum Cause {
    /// Fired by code outside the client (usually the caller).
    External,
    /// Fired by an elapsed deadline.
    Timeout,
    /// Fired by the owner being torn down.
    Disposed,
    /// Free-form tag supplied by the firer.
    Custom(String),
}

impl Cause {
    /// Create a free-form cause tag.
    pub fn custom(tag: impl Into<String>) -> Self {
        Self::Custom(tag.into())
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::External => write!(f, "external"),
            Cause::Timeout => write!(f, "timeout"),
            Cause::Disposed => write!(f, "disposed"),
            Cause::Custom(tag) => write!(f, "{}", tag),
        }
    }
}
