//! Trust-leveled dataset
//!
//! Every key and value passes through the policy before it reaches storage.
//! Keys and values whose asserted trust is below `Validated` are sent through
//! the [`EntryValidator`] hooks; the validated key is then normalized into the
//! access key that indexes the dataset.

use crate::batch::BatchEnvelope;
use crate::entry::{CheckedKeyValue, DatasetEntry};
use crate::error::Result;
use crate::policy::{DatasetPolicy, DatasetStorageMode};
use crate::store::{normalize_access_key, EntryMap};
use crate::validator::EntryValidator;
use error_handling_rs::short_type_name;
use shared_types_rs::{Charset, DatasetConfig, ValidationState};

pub struct ValidatingDataset<V, H: EntryValidator<V>> {
    policy: DatasetPolicy,
    charset: Charset,
    validator: H,
    entries: EntryMap<DatasetEntry<V>>,
}

impl<V, H> std::fmt::Debug for ValidatingDataset<V, H>
where
    V: std::fmt::Debug,
    H: EntryValidator<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatingDataset")
            .field("policy", &self.policy)
            .field("charset", &self.charset)
            .field("validator", &short_type_name::<H>())
            .field("entries", &self.entries)
            .finish()
    }
}

impl<V, H: EntryValidator<V>> ValidatingDataset<V, H> {
    pub fn new(policy: DatasetPolicy, validator: H) -> Self {
        Self::with_charset(policy, Charset::Ascii, validator)
    }

    pub fn with_charset(policy: DatasetPolicy, charset: Charset, validator: H) -> Self {
        Self {
            policy,
            charset,
            validator,
            entries: EntryMap::default(),
        }
    }

    /// Dataset normalizing access keys with the configured charset
    pub fn from_config(policy: DatasetPolicy, config: &DatasetConfig, validator: H) -> Self {
        Self::with_charset(policy, config.charset, validator)
    }

    /// Seed a fresh dataset, consuming it. Fails only when the envelope
    /// throws; see [`Self::store_from_batch_envelope`].
    pub fn seeded(mut self, envelope: BatchEnvelope<V>) -> Result<Self> {
        self.store_from_batch_envelope(envelope)?;
        Ok(self)
    }

    pub fn policy(&self) -> &DatasetPolicy {
        &self.policy
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn validator(&self) -> &H {
        &self.validator
    }

    /// Store each item of `envelope` in order, returning how many were stored.
    ///
    /// With `ExceptionAction::Throw` the first failure aborts the batch as a
    /// [`DatasetError::Batch`](crate::DatasetError::Batch); earlier items stay stored.
    pub fn store_from_batch_envelope(&mut self, envelope: BatchEnvelope<V>) -> Result<usize> {
        let total = envelope.len();
        let stored = envelope.drain_into(short_type_name::<H>(), |key, value| {
            self.store_entry(key, value).map(|_| ())
        })?;

        tracing::debug!(
            validator = short_type_name::<H>(),
            stored,
            skipped = total - stored,
            "dataset seeded from batch envelope"
        );
        Ok(stored)
    }

    /// Validate and store an entry, overwriting whatever the normalized key held
    pub fn store_entry(&mut self, key: &str, value: V) -> std::result::Result<&mut Self, H::Error> {
        let key = self.policy_validate_entry_key(key)?;
        let access_key = normalize_access_key(self.charset, &key);
        let value = self.policy_validate_entry_value(value, &key)?;

        let entry = match self.policy.mode() {
            DatasetStorageMode::EntryObjects => {
                DatasetEntry::Checked(CheckedKeyValue::new(key, value, ValidationState::Validated))
            }
            DatasetStorageMode::ValuesOnly => DatasetEntry::Value(value),
        };

        if self.entries.insert(access_key, entry).is_some() {
            tracing::trace!("dataset entry overwritten");
        }
        Ok(self)
    }

    pub fn get_entry(&self, key: &str) -> std::result::Result<Option<&DatasetEntry<V>>, H::Error> {
        let index = self.access_index(key)?;
        Ok(self.entries.get(&index))
    }

    pub fn get_entry_mut(&mut self, key: &str) -> std::result::Result<Option<&mut DatasetEntry<V>>, H::Error> {
        let index = self.access_index(key)?;
        Ok(self.entries.get_mut(&index))
    }

    /// The stored value, unwrapped from its entry
    pub fn get(&self, key: &str) -> std::result::Result<Option<&V>, H::Error> {
        Ok(self.get_entry(key)?.map(DatasetEntry::value))
    }

    /// Remove an entry; removing an absent key is not an error
    pub fn delete_entry(&mut self, key: &str) -> std::result::Result<&mut Self, H::Error> {
        let index = self.access_index(key)?;
        self.entries.remove(&index);
        Ok(self)
    }

    pub fn has(&self, key: &str) -> std::result::Result<bool, H::Error> {
        let index = self.access_index(key)?;
        Ok(self.entries.contains_key(&index))
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Normalized keys, in insertion order
    pub fn stored_keys(&self) -> Vec<&str> {
        self.entries.keys().collect()
    }

    /// Keys and values, in insertion order.
    ///
    /// Wrapped entries report their validated key; bare values can only report
    /// the normalized key.
    pub fn get_array(&self) -> Vec<(&str, &V)> {
        self.entries
            .iter()
            .map(|(access_key, entry)| (entry.key().unwrap_or(access_key), entry.value()))
            .collect()
    }

    /// Normalized keys and stored entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetEntry<V>)> {
        self.entries.iter()
    }

    pub fn flush_entries(&mut self) {
        self.entries.clear();
    }

    fn policy_validate_entry_key(&self, key: &str) -> std::result::Result<String, H::Error> {
        if self.policy.skips_setter_key() {
            Ok(key.to_string())
        } else {
            self.validator.validate_entry_key(key)
        }
    }

    fn policy_validate_access_key(&self, key: &str) -> std::result::Result<String, H::Error> {
        if self.policy.skips_access_key() {
            Ok(key.to_string())
        } else {
            self.validator.validate_entry_key(key)
        }
    }

    fn policy_validate_entry_value(&self, value: V, key: &str) -> std::result::Result<V, H::Error> {
        if self.policy.skips_value() {
            Ok(value)
        } else {
            self.validator.validate_entry_value(value, key)
        }
    }

    fn access_index(&self, key: &str) -> std::result::Result<String, H::Error> {
        let key = self.policy_validate_access_key(key)?;
        Ok(normalize_access_key(self.charset, &key))
    }
}

impl<'a, V, H: EntryValidator<V>> IntoIterator for &'a ValidatingDataset<V, H> {
    type Item = (&'a str, &'a DatasetEntry<V>);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a DatasetEntry<V>)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, thiserror::Error)]
    #[error("rejected {0}")]
    struct Rejected(String);

    /// Rejects keys containing a dash and negative values, counting key checks
    #[derive(Default)]
    struct Numbers {
        key_checks: Cell<usize>,
    }

    impl EntryValidator<i64> for Numbers {
        type Error = Rejected;

        fn validate_entry_key(&self, key: &str) -> std::result::Result<String, Rejected> {
            self.key_checks.set(self.key_checks.get() + 1);
            if key.contains('-') {
                return Err(Rejected(key.to_string()));
            }
            Ok(key.to_string())
        }

        fn validate_entry_value(&self, value: i64, key: &str) -> std::result::Result<i64, Rejected> {
            if value < 0 {
                return Err(Rejected(key.to_string()));
            }
            Ok(value)
        }
    }

    fn policy(mode: DatasetStorageMode, access: ValidationState, setter: ValidationState, value: ValidationState) -> DatasetPolicy {
        DatasetPolicy::new(mode, access, setter, value).unwrap()
    }

    #[test]
    fn test_entry_objects_wrap_validated_entries() {
        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), Numbers::default());
        dataset.store_entry(" Alpha ", 1).unwrap();

        let entry = dataset.get_entry("alpha").unwrap().unwrap();
        assert_eq!(entry.key(), Some(" Alpha "));
        assert_eq!(entry.state(), Some(ValidationState::Validated));
        assert_eq!(dataset.get_array(), vec![(" Alpha ", &1)]);
    }

    #[test]
    fn test_values_only_drops_original_key() {
        let mut dataset = ValidatingDataset::new(
            DatasetPolicy::untrusted(DatasetStorageMode::ValuesOnly),
            Numbers::default(),
        );
        dataset.store_entry("Alpha", 1).unwrap();

        assert_eq!(dataset.get_entry("ALPHA").unwrap(), Some(&DatasetEntry::Value(1)));
        assert_eq!(dataset.get_array(), vec![("alpha", &1)]);
    }

    #[test]
    fn test_rejections_leave_dataset_untouched() {
        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), Numbers::default());

        assert!(dataset.store_entry("bad-key", 1).is_err());
        assert!(dataset.store_entry("good", -1).is_err());
        assert_eq!(dataset.count(), 0);
        assert!(dataset.has("bad-key").is_err());
    }

    #[test]
    fn test_trusted_inputs_skip_hooks() {
        use ValidationState::{Raw, Trusted, Validated};

        let mut dataset = ValidatingDataset::new(
            policy(DatasetStorageMode::EntryObjects, Trusted, Validated, Validated),
            Numbers::default(),
        );
        dataset.store_entry("a-b", -5).unwrap();
        assert!(dataset.has("A-B").unwrap());
        assert_eq!(dataset.validator().key_checks.get(), 0);

        let mut dataset = ValidatingDataset::new(
            policy(DatasetStorageMode::EntryObjects, Raw, Raw, Raw),
            Numbers::default(),
        );
        dataset.store_entry("a", 1).unwrap();
        dataset.has("a").unwrap();
        dataset.get("a").unwrap();
        assert_eq!(dataset.validator().key_checks.get(), 3);
    }

    #[test]
    fn test_change_state_in_place() {
        let mut dataset = ValidatingDataset::new(DatasetPolicy::default(), Numbers::default());
        dataset.store_entry("a", 1).unwrap();

        if let Some(entry) = dataset.get_entry_mut("a").unwrap().and_then(DatasetEntry::as_checked_mut) {
            entry.change_state(ValidationState::Trusted);
        }
        assert_eq!(
            dataset.get_entry("a").unwrap().and_then(DatasetEntry::state),
            Some(ValidationState::Trusted)
        );
    }

    #[test]
    fn test_utf8_charset_normalization() {
        let mut dataset = ValidatingDataset::with_charset(DatasetPolicy::default(), Charset::Utf8, Numbers::default());
        dataset.store_entry("Ärger", 1).unwrap();

        assert_eq!(dataset.stored_keys(), vec!["ärger"]);
        assert_eq!(dataset.get("ÄRGER").unwrap(), Some(&1));
        assert_eq!((&dataset).into_iter().count(), 1);
    }

    #[test]
    fn test_charset_from_config() {
        let config: DatasetConfig = toml::from_str(
            r#"
default_on_error = "throw"
charset = "UTF-8"
"#,
        )
        .unwrap();

        let mut dataset = ValidatingDataset::from_config(DatasetPolicy::default(), &config, Numbers::default());
        assert_eq!(dataset.charset(), Charset::Utf8);
        dataset.store_entry("ÄRGER", 1).unwrap();

        assert_eq!(dataset.stored_keys(), vec!["ärger"]);
        assert!(dataset.has("ärger").unwrap());

        let dataset = ValidatingDataset::from_config(DatasetPolicy::default(), &DatasetConfig::default(), Numbers::default());
        assert_eq!(dataset.charset(), Charset::Ascii);
    }
}
