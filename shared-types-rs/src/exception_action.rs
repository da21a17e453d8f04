//! What to do when an operation inside a batch fails

use serde::{Deserialize, Serialize};

/// Error handling choice for batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionAction {
    /// Abort and propagate the failure
    Throw,
    /// Swallow the failure and continue
    Ignore,
    /// Hand the failure to a logger and continue
    Log,
}

impl Default for ExceptionAction {
    fn default() -> Self {
        ExceptionAction::Throw
    }
}
