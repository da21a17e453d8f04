//! Dataset errors

use error_handling_rs::WrappedError;
use shared_types_rs::ValidationState;
use thiserror::Error;

/// Result type for dataset construction and batch seeding
pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Invalid trust levels: setter={setter} must be <= access={access}")]
    InvalidTrustLevels {
        setter: ValidationState,
        access: ValidationState,
    },

    #[error("Error logger must be provided when logging errors")]
    MissingErrorLogger,

    /// A batch item failed while the envelope's action was `Throw`
    #[error(transparent)]
    Batch(#[from] WrappedError),
}

impl DatasetError {
    /// The wrapped batch item error, if this is one
    pub fn batch(&self) -> Option<&WrappedError> {
        match self {
            DatasetError::Batch(wrapped) => Some(wrapped),
            _ => None,
        }
    }
}
