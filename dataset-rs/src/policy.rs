//! Dataset storage policy

use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use shared_types_rs::ValidationState;

/// How a validating dataset stores its entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetStorageMode {
    /// Wrap each value in a [`CheckedKeyValue`](crate::CheckedKeyValue) that keeps
    /// the validated key and its trust state
    #[default]
    EntryObjects,
    /// Store bare values; the original key is not retained
    ValuesOnly,
}

/// Storage mode plus the trust levels callers assert for keys and values.
///
/// A trust level of [`ValidationState::Validated`] or above skips the matching
/// validation hook. Setter keys may never be trusted more than access keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetPolicy {
    mode: DatasetStorageMode,
    access_key_trust: ValidationState,
    setter_key_trust: ValidationState,
    value_trust: ValidationState,
}

impl DatasetPolicy {
    pub fn new(
        mode: DatasetStorageMode,
        access_key_trust: ValidationState,
        setter_key_trust: ValidationState,
        value_trust: ValidationState,
    ) -> Result<Self> {
        if !access_key_trust.meets(setter_key_trust) {
            return Err(DatasetError::InvalidTrustLevels {
                setter: setter_key_trust,
                access: access_key_trust,
            });
        }

        Ok(Self {
            mode,
            access_key_trust,
            setter_key_trust,
            value_trust,
        })
    }

    /// Policy with the given mode and every input untrusted
    pub fn untrusted(mode: DatasetStorageMode) -> Self {
        Self {
            mode,
            access_key_trust: ValidationState::Raw,
            setter_key_trust: ValidationState::Raw,
            value_trust: ValidationState::Raw,
        }
    }

    pub fn mode(&self) -> DatasetStorageMode {
        self.mode
    }

    pub fn access_key_trust(&self) -> ValidationState {
        self.access_key_trust
    }

    pub fn setter_key_trust(&self) -> ValidationState {
        self.setter_key_trust
    }

    pub fn value_trust(&self) -> ValidationState {
        self.value_trust
    }

    pub(crate) fn skips_setter_key(&self) -> bool {
        self.setter_key_trust.meets(ValidationState::Validated)
    }

    pub(crate) fn skips_access_key(&self) -> bool {
        self.access_key_trust.meets(ValidationState::Validated)
    }

    pub(crate) fn skips_value(&self) -> bool {
        self.value_trust.meets(ValidationState::Validated)
    }
}

impl Default for DatasetPolicy {
    fn default() -> Self {
        Self::untrusted(DatasetStorageMode::EntryObjects)
    }
}

impl<'de> Deserialize<'de> for DatasetPolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(default)]
        struct PolicyFields {
            mode: DatasetStorageMode,
            access_key_trust: ValidationState,
            setter_key_trust: ValidationState,
            value_trust: ValidationState,
        }

        impl Default for PolicyFields {
            fn default() -> Self {
                let policy = DatasetPolicy::default();
                Self {
                    mode: policy.mode,
                    access_key_trust: policy.access_key_trust,
                    setter_key_trust: policy.setter_key_trust,
                    value_trust: policy.value_trust,
                }
            }
        }

        let raw = PolicyFields::deserialize(deserializer)?;
        DatasetPolicy::new(raw.mode, raw.access_key_trust, raw.setter_key_trust, raw.value_trust)
            .map_err(serde::de::Error::custom)
    }
}
