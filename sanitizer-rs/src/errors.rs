//! Error handling for the sanitizer
//!
//! Every rule violation is reported as a single [`SanitizerError`] carrying a
//! discriminant [`SanitizerErrorCode`]. The numeric identifiers are stable and
//! grouped by category: type/charset (1-2), callbacks (11-13), length (21-23),
//! matching (31-32).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for sanitizer operations
pub type SanitizerResult<T> = Result<T, SanitizerError>;

/// Discriminant of a sanitizer failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SanitizerErrorCode {
    /// Input is not a string
    TypeError,
    /// Input contains characters outside the allowed charset
    CharsetError,
    /// A modifier callback did not return a string
    ModifierCallbackTypeError,
    /// A validation callback did not return a boolean
    ValidatorCallbackTypeError,
    /// A validation callback returned false
    ValidatorCallbackFailed,
    /// Length differs from the required exact length
    LengthError,
    /// Length is below the minimum
    LengthUnderflowError,
    /// Length is above the maximum
    LengthOverflowError,
    /// A configured pattern did not match
    RegexpMatchError,
    /// Value is not one of the allowed tokens
    EnumError,
}

impl SanitizerErrorCode {
    pub const ALL: [SanitizerErrorCode; 10] = [
        SanitizerErrorCode::TypeError,
        SanitizerErrorCode::CharsetError,
        SanitizerErrorCode::ModifierCallbackTypeError,
        SanitizerErrorCode::ValidatorCallbackTypeError,
        SanitizerErrorCode::ValidatorCallbackFailed,
        SanitizerErrorCode::LengthError,
        SanitizerErrorCode::LengthUnderflowError,
        SanitizerErrorCode::LengthOverflowError,
        SanitizerErrorCode::RegexpMatchError,
        SanitizerErrorCode::EnumError,
    ];

    /// Stable numeric identifier
    pub const fn code(self) -> u8 {
        match self {
            SanitizerErrorCode::TypeError => 1,
            SanitizerErrorCode::CharsetError => 2,
            SanitizerErrorCode::ModifierCallbackTypeError => 11,
            SanitizerErrorCode::ValidatorCallbackTypeError => 12,
            SanitizerErrorCode::ValidatorCallbackFailed => 13,
            SanitizerErrorCode::LengthError => 21,
            SanitizerErrorCode::LengthUnderflowError => 22,
            SanitizerErrorCode::LengthOverflowError => 23,
            SanitizerErrorCode::RegexpMatchError => 31,
            SanitizerErrorCode::EnumError => 32,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            SanitizerErrorCode::TypeError => "TYPE_ERROR",
            SanitizerErrorCode::CharsetError => "CHARSET_ERROR",
            SanitizerErrorCode::ModifierCallbackTypeError => "MODIFIER_CALLBACK_TYPE_ERROR",
            SanitizerErrorCode::ValidatorCallbackTypeError => "VALIDATOR_CALLBACK_TYPE_ERROR",
            SanitizerErrorCode::ValidatorCallbackFailed => "VALIDATOR_CALLBACK_FAILED",
            SanitizerErrorCode::LengthError => "LENGTH_ERROR",
            SanitizerErrorCode::LengthUnderflowError => "LENGTH_UNDERFLOW_ERROR",
            SanitizerErrorCode::LengthOverflowError => "LENGTH_OVERFLOW_ERROR",
            SanitizerErrorCode::RegexpMatchError => "REGEXP_MATCH_ERROR",
            SanitizerErrorCode::EnumError => "ENUM_ERROR",
        }
    }
}

impl fmt::Display for SanitizerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SanitizerErrorCode> for u8 {
    fn from(code: SanitizerErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u8> for SanitizerErrorCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SanitizerErrorCode::from_code(value)
            .ok_or_else(|| format!("Unknown sanitizer error code: {}", value))
    }
}

/// A sanitizer rule violation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}{}", step_suffix(.index))]
pub struct SanitizerError {
    /// Which rule failed
    pub code: SanitizerErrorCode,
    /// The offending value, only present when subject capture is enabled
    pub subject: Option<String>,
    /// Position of the failing callback or pattern, where one applies
    pub index: Option<usize>,
}

fn step_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (step {})", i),
        None => String::new(),
    }
}

impl SanitizerError {
    pub fn new(code: SanitizerErrorCode) -> Self {
        Self {
            code,
            subject: None,
            index: None,
        }
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns true if this is one of the length errors
    pub fn is_length_error(&self) -> bool {
        matches!(
            self.code,
            SanitizerErrorCode::LengthError
                | SanitizerErrorCode::LengthUnderflowError
                | SanitizerErrorCode::LengthOverflowError
        )
    }
}

impl From<SanitizerErrorCode> for SanitizerError {
    fn from(code: SanitizerErrorCode) -> Self {
        SanitizerError::new(code)
    }
}

/// Invalid sanitizer configuration, raised while building a sanitizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizerConfigError {
    #[error("Invalid minimum and maximum length: min {min} exceeds max {max}")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("Invalid regex pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SanitizerErrorCode::TypeError, 1)]
    #[test_case(SanitizerErrorCode::CharsetError, 2)]
    #[test_case(SanitizerErrorCode::ModifierCallbackTypeError, 11)]
    #[test_case(SanitizerErrorCode::ValidatorCallbackTypeError, 12)]
    #[test_case(SanitizerErrorCode::ValidatorCallbackFailed, 13)]
    #[test_case(SanitizerErrorCode::LengthError, 21)]
    #[test_case(SanitizerErrorCode::LengthUnderflowError, 22)]
    #[test_case(SanitizerErrorCode::LengthOverflowError, 23)]
    #[test_case(SanitizerErrorCode::RegexpMatchError, 31)]
    #[test_case(SanitizerErrorCode::EnumError, 32)]
    fn test_stable_codes(code: SanitizerErrorCode, id: u8) {
        assert_eq!(code.code(), id);
        assert_eq!(SanitizerErrorCode::from_code(id), Some(code));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(SanitizerErrorCode::from_code(3), None);
        assert!(SanitizerErrorCode::try_from(99u8).is_err());
    }

    #[test]
    fn test_serializes_as_numeric_code() {
        let err = SanitizerError::new(SanitizerErrorCode::RegexpMatchError)
            .with_subject("abc")
            .with_index(1);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 31);
        assert_eq!(json["subject"], "abc");
        assert_eq!(json["index"], 1);

        let back: SanitizerError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_display() {
        let err = SanitizerError::new(SanitizerErrorCode::LengthUnderflowError);
        assert_eq!(err.to_string(), "LENGTH_UNDERFLOW_ERROR");
        assert!(err.is_length_error());

        let err = SanitizerError::new(SanitizerErrorCode::ValidatorCallbackFailed).with_index(2);
        assert_eq!(err.to_string(), "VALIDATOR_CALLBACK_FAILED (step 2)");
        assert!(!err.is_length_error());
    }
}
