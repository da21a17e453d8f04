//! # Datasets
//!
//! Key/value containers addressed by normalized access keys (trimmed and
//! lowercased per charset).
//!
//! - [`Dataset`] stores entries as given.
//! - [`ValidatingDataset`] consults a [`DatasetPolicy`] and an
//!   [`EntryValidator`] before anything is stored, and marks stored entries
//!   as `Validated`.
//!
//! Both can be seeded from a [`BatchEnvelope`], whose [`ExceptionAction`]
//! decides whether a failing item aborts the batch, is skipped, or is logged.
//!
//! [`ExceptionAction`]: shared_types_rs::ExceptionAction

mod batch;
mod dataset;
mod entry;
mod error;
mod policy;
mod store;
mod validating;
mod validator;

pub use batch::BatchEnvelope;
pub use dataset::Dataset;
pub use entry::{CheckedKeyValue, DatasetEntry, KeyValue};
pub use error::{DatasetError, Result};
pub use policy::{DatasetPolicy, DatasetStorageMode};
pub use store::normalize_access_key;
pub use validating::ValidatingDataset;
pub use validator::{EntryValidator, SanitizedEntries, SanitizedKeys};

#[cfg(test)]
mod tests;
