//! Closed priority scale shared by projects and checklist items.

use serde::{Deserialize, Serialize};

/// Priority level used by projects and checklist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Coerces a free-text priority token into the closed scale.
    ///
    /// The generation model is an untrusted text source; anything outside
    /// `low|medium|high` (case-insensitive) falls back to `Medium` instead
    /// of rejecting the surrounding item.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            _ => Self::Medium,
        }
    }

    /// Returns the canonical wire token for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}
