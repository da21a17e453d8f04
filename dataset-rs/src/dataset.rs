//! Plain charset-aware dataset

use crate::batch::BatchEnvelope;
use crate::entry::KeyValue;
use crate::error::Result;
use crate::store::{normalize_access_key, EntryMap};
use shared_types_rs::{Charset, DatasetConfig};
use std::convert::Infallible;

/// Key/value store with case-insensitive, whitespace-insensitive keys.
///
/// Entries keep the key they were stored with; lookups go through the
/// normalized form, so `" Foo "` and `"foo"` address the same slot.
#[derive(Debug, Clone)]
pub struct Dataset<V> {
    charset: Charset,
    entries: EntryMap<KeyValue<V>>,
}

impl<V> Default for Dataset<V> {
    fn default() -> Self {
        Self::new(Charset::default())
    }
}

impl<V> Dataset<V> {
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            entries: EntryMap::default(),
        }
    }

    /// Empty dataset normalizing keys with the configured charset
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.charset)
    }

    /// New dataset seeded from `envelope`
    pub fn seeded(charset: Charset, envelope: BatchEnvelope<V>) -> Result<Self> {
        let mut dataset = Self::new(charset);
        dataset.store_from_batch_envelope(envelope)?;
        Ok(dataset)
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Store every item of `envelope`; plain stores cannot fail
    pub fn store_from_batch_envelope(&mut self, envelope: BatchEnvelope<V>) -> Result<usize> {
        envelope.drain_into("Dataset", |key, value| {
            self.store_entry(key, value);
            Ok::<(), Infallible>(())
        })
    }

    pub fn store_entry(&mut self, key: &str, value: V) -> &mut Self {
        let access_key = normalize_access_key(self.charset, key);
        self.entries.insert(access_key, KeyValue::new(key, value));
        self
    }

    pub fn get_entry(&self, key: &str) -> Option<&KeyValue<V>> {
        self.entries.get(&normalize_access_key(self.charset, key))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_entry(key).map(KeyValue::value)
    }

    pub fn delete_entry(&mut self, key: &str) -> &mut Self {
        self.entries.remove(&normalize_access_key(self.charset, key));
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_access_key(self.charset, key))
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

    /// Original keys and values, in insertion order
    pub fn get_array(&self) -> Vec<(&str, &V)> {
        self.entries.values().map(|kv| (kv.key(), kv.value())).collect()
    }

    /// Normalized keys and their entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyValue<V>)> {
        self.entries.iter()
    }

    pub fn flush_entries(&mut self) {
        self.entries.clear();
    }

    pub fn into_entries(self) -> impl Iterator<Item = KeyValue<V>> {
        self.entries.into_entries().map(|(_, kv)| kv)
    }
}
