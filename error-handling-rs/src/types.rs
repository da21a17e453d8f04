//! # Wrapped Errors
//!
//! A failure raised inside a larger operation, re-thrown with context about
//! where it happened and what kind of error it was.

use std::error::Error as StdError;
use std::fmt;

/// A type alias for Result with the error type defaulting to [`WrappedError`]
pub type Result<T, E = WrappedError> = std::result::Result<T, E>;

/// An error that wraps another error as its source.
#[derive(Debug)]
pub struct WrappedError {
    /// Human readable context message
    pub message: String,
    /// Short type name of the component that caught the error
    pub origin: &'static str,
    /// Short type name of the wrapped error
    pub error_type: &'static str,
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl WrappedError {
    /// Wraps `error` with an explicit message
    pub fn new<E, S>(error: E, origin: &'static str, message: S) -> Self
    where
        E: StdError + Send + Sync + 'static,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            origin,
            error_type: short_type_name::<E>(),
            source: Box::new(error),
        }
    }

    /// Wraps an error caught while storing an item from a batch envelope.
    ///
    /// The message reads `"<origin> encountered <error type> during store fn from batch envelope"`.
    pub fn batch_store<E>(error: E, origin: &'static str) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let error_type = short_type_name::<E>();
        Self {
            message: format!(
                "{} encountered {} during store fn from batch envelope",
                origin, error_type
            ),
            origin,
            error_type,
            source: Box::new(error),
        }
    }

    /// The wrapped error
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Attempts to view the wrapped error as a concrete type
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }

    /// Unwraps into the source error
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.source
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.source)
    }
}

impl StdError for WrappedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Last path segment of a type name, generics stripped: `a::b::Foo<c::Bar>` becomes `Foo`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}
