//! Batch seeding envelopes

use crate::error::{DatasetError, Result};
use error_handling_rs::BatchErrorLogger;
use shared_types_rs::{DatasetConfig, ExceptionAction};
use std::error::Error as StdError;
use std::fmt;

/// Items to seed a dataset with, and what to do when one of them fails.
///
/// An envelope is consumed by the dataset that stores it.
pub struct BatchEnvelope<V> {
    items: Vec<(String, V)>,
    on_error: ExceptionAction,
    error_logger: Option<BatchErrorLogger>,
}

impl<V> BatchEnvelope<V> {
    /// `ExceptionAction::Log` requires an error logger
    pub fn new<I, K>(items: I, on_error: ExceptionAction, error_logger: Option<BatchErrorLogger>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        if on_error == ExceptionAction::Log && error_logger.is_none() {
            return Err(DatasetError::MissingErrorLogger);
        }

        Ok(Self {
            items: items.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            on_error,
            error_logger,
        })
    }

    /// Envelope that aborts on the first failing item
    pub fn throwing<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            on_error: ExceptionAction::Throw,
            error_logger: None,
        }
    }

    /// Envelope using the configured default action.
    ///
    /// When the configured action is `Log` and no logger is given, failures are
    /// reported through [`error_handling_rs::tracing_error_logger`].
    pub fn with_default_action<I, K>(
        items: I,
        config: &DatasetConfig,
        error_logger: Option<BatchErrorLogger>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let error_logger = match (config.default_on_error, error_logger) {
            (ExceptionAction::Log, None) => Some(error_handling_rs::tracing_error_logger()),
            (_, logger) => logger,
        };

        Self {
            items: items.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            on_error: config.default_on_error,
            error_logger,
        }
    }

    pub fn on_error(&self) -> ExceptionAction {
        self.on_error
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run `store` over every item in order and apply the envelope's error action.
    ///
    /// Returns how many items were stored. With `Throw` the first failure is
    /// wrapped and returned; items stored before it stay stored.
    pub(crate) fn drain_into<E, F>(self, origin: &'static str, mut store: F) -> Result<usize>
    where
        E: StdError + Send + Sync + 'static,
        F: FnMut(&str, V) -> std::result::Result<(), E>,
    {
        let BatchEnvelope {
            items,
            on_error,
            mut error_logger,
        } = self;

        let mut stored = 0;
        for (key, value) in items {
            let error = match store(&key, value) {
                Ok(()) => {
                    stored += 1;
                    continue;
                }
                Err(error) => error,
            };

            match on_error {
                ExceptionAction::Throw => {
                    tracing::debug!(origin, key = %key, stored, "batch seeding aborted");
                    return Err(error_handling_rs::WrappedError::batch_store(error, origin).into());
                }
                ExceptionAction::Ignore => {
                    tracing::trace!(origin, key = %key, error = %error, "batch item ignored");
                }
                ExceptionAction::Log => {
                    if let Some(logger) = error_logger.as_mut() {
                        logger(key.as_str(), &error as &(dyn StdError + 'static));
                    }
                }
            }
        }

        Ok(stored)
    }
}

impl<V> fmt::Debug for BatchEnvelope<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchEnvelope")
            .field("items", &self.items.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("on_error", &self.on_error)
            .field("error_logger", &self.error_logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_requires_logger() {
        let err = BatchEnvelope::new([("a", 1)], ExceptionAction::Log, None).unwrap_err();
        assert!(matches!(err, DatasetError::MissingErrorLogger));

        let logger: BatchErrorLogger = Box::new(|_: &str, _: &(dyn StdError + 'static)| {});
        let envelope = BatchEnvelope::new([("a", 1)], ExceptionAction::Log, Some(logger)).unwrap();
        assert_eq!(envelope.on_error(), ExceptionAction::Log);
        assert_eq!(envelope.len(), 1);
    }

    #[test]
    fn test_default_action_from_config() {
        let config = DatasetConfig {
            default_on_error: ExceptionAction::Log,
            ..DatasetConfig::default()
        };
        let envelope = BatchEnvelope::with_default_action(Vec::<(String, u8)>::new(), &config, None);
        assert_eq!(envelope.on_error(), ExceptionAction::Log);
        assert!(envelope.is_empty());
        assert!(format!("{:?}", envelope).contains("error_logger: true"));

        let envelope = BatchEnvelope::with_default_action([("k", 1u8)], &DatasetConfig::default(), None);
        assert_eq!(envelope.on_error(), ExceptionAction::Throw);
    }
}
