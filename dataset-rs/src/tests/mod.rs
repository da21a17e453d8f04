//! Cross-module dataset tests
//!
//! Batch seeding under each error action, and sanitizers wired into
//! validating datasets.

pub mod batch_seeding_tests;
