//! Stored entry types

use serde::{Deserialize, Serialize};
use shared_types_rs::ValidationState;

/// An immutable key/value pair. The key keeps its original casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue<V> {
    key: String,
    value: V,
}

impl<V> KeyValue<V> {
    pub fn new<K: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// A key/value pair tagged with the trust state it was stored under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedKeyValue<V> {
    key: String,
    value: V,
    state: ValidationState,
}

impl<V> CheckedKeyValue<V> {
    pub fn new<K: Into<String>>(key: K, value: V, state: ValidationState) -> Self {
        Self {
            key: key.into(),
            value,
            state,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Move the entry to another trust state in place
    pub fn change_state(&mut self, state: ValidationState) -> &mut Self {
        self.state = state;
        self
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<V> From<CheckedKeyValue<V>> for KeyValue<V> {
    fn from(checked: CheckedKeyValue<V>) -> Self {
        KeyValue::new(checked.key, checked.value)
    }
}

/// What a validating dataset holds under a normalized key, depending on its
/// [`DatasetStorageMode`](crate::DatasetStorageMode)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetEntry<V> {
    Checked(CheckedKeyValue<V>),
    Value(V),
}

impl<V> DatasetEntry<V> {
    pub fn value(&self) -> &V {
        match self {
            DatasetEntry::Checked(entry) => entry.value(),
            DatasetEntry::Value(value) => value,
        }
    }

    /// The validated key; only retained for wrapped entries
    pub fn key(&self) -> Option<&str> {
        match self {
            DatasetEntry::Checked(entry) => Some(entry.key()),
            DatasetEntry::Value(_) => None,
        }
    }

    pub fn state(&self) -> Option<ValidationState> {
        match self {
            DatasetEntry::Checked(entry) => Some(entry.state()),
            DatasetEntry::Value(_) => None,
        }
    }

    pub fn as_checked(&self) -> Option<&CheckedKeyValue<V>> {
        match self {
            DatasetEntry::Checked(entry) => Some(entry),
            DatasetEntry::Value(_) => None,
        }
    }

    pub fn as_checked_mut(&mut self) -> Option<&mut CheckedKeyValue<V>> {
        match self {
            DatasetEntry::Checked(entry) => Some(entry),
            DatasetEntry::Value(_) => None,
        }
    }

    pub fn into_value(self) -> V {
        match self {
            DatasetEntry::Checked(entry) => entry.value,
            DatasetEntry::Value(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_change_state() {
        let mut entry = CheckedKeyValue::new("Name", 7, ValidationState::Validated);
        entry.change_state(ValidationState::Trusted);
        assert_eq!(entry.state(), ValidationState::Trusted);
        assert_eq!(entry.key(), "Name");

        let plain: KeyValue<i32> = entry.into();
        assert_eq!(plain.into_parts(), ("Name".to_string(), 7));
    }

    #[test]
    fn test_dataset_entry_accessors() {
        let wrapped = DatasetEntry::Checked(CheckedKeyValue::new("Key", "v", ValidationState::Validated));
        assert_eq!(wrapped.key(), Some("Key"));
        assert_eq!(wrapped.state(), Some(ValidationState::Validated));
        assert_eq!(*wrapped.value(), "v");

        let bare = DatasetEntry::Value("v");
        assert_eq!(bare.key(), None);
        assert_eq!(bare.state(), None);
        assert_eq!(bare.into_value(), "v");
    }
}
