//! # Error Handling
//!
//! Error wrapping and logging shared by the workspace crates.
//!
//! - [`WrappedError`] carries a failure out of a batch operation together with
//!   the name of the component and the type of the underlying error
//! - [`logging::init_logging`] installs a `tracing` subscriber once per process
//! - [`logging::tracing_error_logger`] is a ready-made batch error logger

pub mod logging;
pub mod types;

pub use logging::{init_logging, tracing_error_logger, BatchErrorLogger};
pub use types::{short_type_name, Result, WrappedError};
