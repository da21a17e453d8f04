//! Ordered trust levels

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much validation a piece of data has already been through.
///
/// Variants are declared in rank order, so the derived `Ord` matches `rank()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationState {
    Raw,
    Normalized,
    Validated,
    Trusted,
}

impl ValidationState {
    pub const ALL: [ValidationState; 4] = [
        ValidationState::Raw,
        ValidationState::Normalized,
        ValidationState::Validated,
        ValidationState::Trusted,
    ];

    /// Integer rank of this state
    pub const fn rank(self) -> u8 {
        match self {
            ValidationState::Raw => 0,
            ValidationState::Normalized => 1,
            ValidationState::Validated => 2,
            ValidationState::Trusted => 3,
        }
    }

    /// True if this state is at least as trusted as `required`
    pub const fn meets(self, required: ValidationState) -> bool {
        self.rank() >= required.rank()
    }

    pub fn name(self) -> &'static str {
        match self {
            ValidationState::Raw => "RAW",
            ValidationState::Normalized => "NORMALIZED",
            ValidationState::Validated => "VALIDATED",
            ValidationState::Trusted => "TRUSTED",
        }
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        ValidationState::Raw
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.rank())
    }
}
