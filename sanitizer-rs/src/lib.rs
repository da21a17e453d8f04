//! # Sanitizer Library
//!
//! Charset-aware string sanitization. A sanitizer normalizes a value with
//! modifiers and callbacks, then checks it against charset, length, pattern,
//! token-set and callback rules. The first failing rule aborts processing with a
//! coded [`SanitizerError`].
//!
//! ## Features
//!
//! - ASCII sanitizer, optionally restricted to printable characters
//! - UTF-8 sanitizer with an allow-set of Unicode script ranges
//! - Case, trim and whitespace modifiers
//! - Typed and dynamically typed callbacks
//!
//! ```ignore
//! use sanitizer_rs::prelude::*;
//!
//! let colors = AsciiSanitizer::new(true)
//!     .modifiers([Modifier::Trim(TrimStr::Both), ChangeCase::Lowercase.into()])
//!     .exists_in_set(["red", "green", "blue"]);
//!
//! assert_eq!(colors.process(" Red ")?, "red");
//! ```

pub mod charsets;
mod errors;
pub mod modifiers;
pub mod sanitizer;

pub use charsets::UnicodeRange;
pub use errors::{SanitizerConfigError, SanitizerError, SanitizerErrorCode, SanitizerResult};
pub use modifiers::{ChangeCase, Modifier, TrimStr};
pub use sanitizer::{AsciiSanitizer, CharsetRule, LengthRule, Sanitizer, Utf8Sanitizer};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::charsets::UnicodeRange;
    pub use crate::errors::{SanitizerConfigError, SanitizerError, SanitizerErrorCode, SanitizerResult};
    pub use crate::modifiers::{ChangeCase, Modifier, TrimStr};
    pub use crate::sanitizer::{AsciiSanitizer, Sanitizer, Utf8Sanitizer};
}

/// Version of the sanitizer library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ASCII sanitizer configured from the global [`shared_types_rs::BaseConfig`],
/// falling back to defaults when it has not been loaded
pub fn ascii(printable_only: bool) -> AsciiSanitizer {
    AsciiSanitizer::new(printable_only).configure(&global_config())
}

/// UTF-8 sanitizer configured from the global [`shared_types_rs::BaseConfig`]
pub fn utf8(allow_ascii: bool, allow_spaces: bool) -> Utf8Sanitizer {
    Utf8Sanitizer::new(allow_ascii, allow_spaces).configure(&global_config())
}

fn global_config() -> shared_types_rs::SanitizerConfig {
    shared_types_rs::BaseConfig::get()
        .map(|config| config.sanitizer.clone())
        .unwrap_or_default()
}
