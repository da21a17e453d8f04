//! # Registries
//!
//! - [`ObjectsRegistry`]: named instances under normalized keys.
//! - [`InstanceRegistry`]: at most one instance per type. It is an ordinary
//!   value, created at startup and handed to whoever needs it, rather than
//!   class-level static state.

mod instances;
mod keys;
mod objects;

pub use instances::InstanceRegistry;
pub use keys::{KeyNormalizer, LowercaseTrimmed, Verbatim};
pub use objects::ObjectsRegistry;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Instance of {0} not found")]
    NotFound(&'static str),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
