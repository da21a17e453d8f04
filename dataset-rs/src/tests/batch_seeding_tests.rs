//! Tests for batch seeding under each error action

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::error::Error as StdError;
    use std::rc::Rc;

    use error_handling_rs::BatchErrorLogger;
    use sanitizer_rs::{AsciiSanitizer, SanitizerError, SanitizerErrorCode};
    use shared_types_rs::{Charset, DatasetConfig, ExceptionAction};
    use test_case::test_case;

    use crate::{BatchEnvelope, DatasetError, DatasetPolicy, SanitizedKeys, ValidatingDataset};

    type Keys = SanitizedKeys<sanitizer_rs::sanitizer::AsciiRule>;

    fn lowercase_keys() -> Keys {
        SanitizedKeys::new(
            AsciiSanitizer::new(true)
                .match_regex([r"^[a-z_]+$"])
                .unwrap(),
        )
    }

    fn items() -> Vec<(&'static str, u32)> {
        vec![("alpha", 1), ("beta", 2), ("Bad Key", 3), ("gamma", 4), ("9lives", 5)]
    }

    fn recording_logger() -> (BatchErrorLogger, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let logger: BatchErrorLogger = Box::new(move |key: &str, error: &(dyn StdError + 'static)| {
            sink.borrow_mut().push(format!("{} => {}", key, error));
        });
        (logger, seen)
    }

    #[test]
    fn test_ignore_skips_failing_items() {
        let envelope = BatchEnvelope::new(items(), ExceptionAction::Ignore, None).unwrap();

        let dataset = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys())
            .seeded(envelope)
            .unwrap();

        // five items, two rejected
        assert_eq!(dataset.count(), 3);
        assert_eq!(dataset.stored_keys(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_log_reports_each_failure() {
        let (logger, seen) = recording_logger();
        let envelope = BatchEnvelope::new(items(), ExceptionAction::Log, Some(logger)).unwrap();

        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys());
        let stored = dataset.store_from_batch_envelope(envelope).unwrap();

        assert_eq!(stored, 3);
        assert_eq!(
            *seen.borrow(),
            vec![
                "Bad Key => REGEXP_MATCH_ERROR (step 0)".to_string(),
                "9lives => REGEXP_MATCH_ERROR (step 0)".to_string(),
            ]
        );
    }

    #[test]
    fn test_throw_keeps_items_before_the_failure() {
        let envelope = BatchEnvelope::throwing(items());
        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys());

        let err = dataset.store_from_batch_envelope(envelope).unwrap_err();

        assert!(dataset.has("alpha").unwrap());
        assert!(dataset.has("beta").unwrap());
        assert!(!dataset.has("gamma").unwrap());
        assert_eq!(dataset.count(), 2);

        let wrapped = err.batch().expect("batch error");
        assert_eq!(wrapped.origin, "SanitizedKeys");
        assert_eq!(wrapped.error_type, "SanitizerError");
        assert_eq!(
            wrapped.message,
            "SanitizedKeys encountered SanitizerError during store fn from batch envelope"
        );

        let cause = wrapped.downcast_ref::<SanitizerError>().unwrap();
        assert_eq!(cause.code, SanitizerErrorCode::RegexpMatchError);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_seeded_constructor_propagates_throw() {
        let result = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys())
            .seeded(BatchEnvelope::throwing(items()));

        assert!(matches!(result, Err(DatasetError::Batch(_))));
    }

    #[test_case(ExceptionAction::Throw, 2 ; "throw stops at first failure")]
    #[test_case(ExceptionAction::Ignore, 3 ; "ignore continues")]
    #[test_case(ExceptionAction::Log, 3 ; "log continues")]
    fn test_configured_default_action(action: ExceptionAction, expected: usize) {
        let config = DatasetConfig {
            default_on_error: action,
            charset: Charset::Ascii,
        };
        let envelope = BatchEnvelope::with_default_action(items(), &config, None);

        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys());
        let result = dataset.store_from_batch_envelope(envelope);

        match action {
            ExceptionAction::Throw => assert!(matches!(result, Err(DatasetError::Batch(_)))),
            ExceptionAction::Ignore | ExceptionAction::Log => {
                assert_eq!(result.unwrap(), expected)
            }
        }
        assert_eq!(dataset.count(), expected);
    }

    #[test]
    fn test_empty_envelope() {
        let envelope = BatchEnvelope::<u32>::throwing(Vec::<(String, u32)>::new());
        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), lowercase_keys());

        assert_eq!(dataset.store_from_batch_envelope(envelope).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_keys_in_batch_overwrite() {
        let envelope = BatchEnvelope::throwing([("Alpha", 1), ("alpha", 2)]);
        let dataset = crate::Dataset::seeded(Charset::Ascii, envelope).unwrap();

        assert_eq!(dataset.count(), 1);
        assert_eq!(dataset.get("ALPHA"), Some(&2));
    }
}
