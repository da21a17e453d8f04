//! Shared primitives used across the workspace.
//!
//! Everything here is a leaf: no crate in this workspace is depended upon by
//! `shared-types-rs`. The sanitizer, dataset and registry crates all speak in
//! terms of these types.

pub mod charset;
pub mod config;
pub mod exception_action;
pub mod validation_state;

pub use charset::Charset;
pub use config::{BaseConfig, ConfigError, DatasetConfig, LoggingConfig, SanitizerConfig};
pub use exception_action::ExceptionAction;
pub use validation_state::ValidationState;
