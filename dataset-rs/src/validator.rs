//! Entry validation hooks

use sanitizer_rs::{CharsetRule, Sanitizer, SanitizerError};
use std::error::Error as StdError;
use std::fmt;

/// Validation hooks consulted by a [`ValidatingDataset`](crate::ValidatingDataset).
///
/// Both hooks normalize as well as validate: the returned key or value is
/// what gets stored.
pub trait EntryValidator<V> {
    type Error: StdError + Send + Sync + 'static;

    /// Normalize and validate a raw key
    fn validate_entry_key(&self, key: &str) -> Result<String, Self::Error>;

    /// Normalize and validate a raw value, given its already resolved key
    fn validate_entry_value(&self, value: V, key: &str) -> Result<V, Self::Error>;
}

/// Runs keys through a sanitizer and accepts any value unchanged
pub struct SanitizedKeys<R: CharsetRule> {
    keys: Sanitizer<R>,
}

impl<R: CharsetRule> SanitizedKeys<R> {
    pub fn new(keys: Sanitizer<R>) -> Self {
        Self { keys }
    }
}

impl<R: CharsetRule + fmt::Debug> fmt::Debug for SanitizedKeys<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizedKeys").field("keys", &self.keys).finish()
    }
}

impl<V, R: CharsetRule> EntryValidator<V> for SanitizedKeys<R> {
    type Error = SanitizerError;

    fn validate_entry_key(&self, key: &str) -> Result<String, SanitizerError> {
        self.keys.process(key)
    }

    fn validate_entry_value(&self, value: V, _key: &str) -> Result<V, SanitizerError> {
        Ok(value)
    }
}

/// Runs string keys and string values through their own sanitizers
pub struct SanitizedEntries<K: CharsetRule, S: CharsetRule> {
    keys: Sanitizer<K>,
    values: Sanitizer<S>,
}

impl<K: CharsetRule, S: CharsetRule> SanitizedEntries<K, S> {
    pub fn new(keys: Sanitizer<K>, values: Sanitizer<S>) -> Self {
        Self { keys, values }
    }
}

impl<K: CharsetRule, S: CharsetRule> EntryValidator<String> for SanitizedEntries<K, S> {
    type Error = SanitizerError;

    fn validate_entry_key(&self, key: &str) -> Result<String, SanitizerError> {
        self.keys.process(key)
    }

    fn validate_entry_value(&self, value: String, _key: &str) -> Result<String, SanitizerError> {
        self.values.process(&value)
    }
}
