//! Rule engine shared by the ASCII and UTF-8 sanitizers
//!
//! A [`Sanitizer`] is configured with a fluent builder and then run over
//! values. Processing is all-or-nothing: the first violated rule aborts with a
//! [`SanitizerError`] and no partial result is returned.
//!
//! Processing order:
//!
//! 1. type check (dynamic input only)
//! 2. modifiers, de-duplicated, in registration order
//! 3. modifier callbacks
//! 4. charset check
//! 5. length check
//! 6. regex patterns, all must match
//! 7. token set membership
//! 8. validation callbacks

pub mod ascii;
pub mod utf8;

pub use ascii::{AsciiRule, AsciiSanitizer};
pub use utf8::{Utf8Rule, Utf8Sanitizer};

use crate::errors::{SanitizerConfigError, SanitizerError, SanitizerErrorCode, SanitizerResult};
use crate::modifiers::{unique_modifiers, Modifier};
use regex::Regex;
use serde_json::Value;
use shared_types_rs::{Charset, SanitizerConfig};
use std::fmt;

/// Charset-specific part of a sanitizer
pub trait CharsetRule {
    /// Charset used for modifiers and length counting
    fn charset(&self) -> Charset;

    /// True if every character of `value` belongs to the allowed set
    fn accepts(&self, value: &str) -> bool;
}

/// Length requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    Any,
    Exact(usize),
    /// A bound of zero is not checked
    Range { min: usize, max: usize },
}

type ModifierFn = Box<dyn Fn(&str) -> String + Send + Sync>;
type ModifierDynFn = Box<dyn Fn(&str) -> Value + Send + Sync>;
type ValidatorFn = Box<dyn Fn(&str) -> bool + Send + Sync>;
type ValidatorDynFn = Box<dyn Fn(&str) -> Value + Send + Sync>;

enum ModifierCallback {
    Typed(ModifierFn),
    Dynamic(ModifierDynFn),
}

enum ValidationCallback {
    Typed(ValidatorFn),
    Dynamic(ValidatorDynFn),
}

/// Configurable string sanitizer, parameterized by its charset rule
pub struct Sanitizer<R: CharsetRule> {
    rule: R,
    capture_subject: bool,
    length: LengthRule,
    modifiers: Vec<Modifier>,
    modifier_callbacks: Vec<ModifierCallback>,
    patterns: Vec<Regex>,
    tokens: Vec<String>,
    validation_callbacks: Vec<ValidationCallback>,
}

impl<R: CharsetRule + fmt::Debug> fmt::Debug for Sanitizer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("rule", &self.rule)
            .field("capture_subject", &self.capture_subject)
            .field("length", &self.length)
            .field("modifiers", &self.modifiers)
            .field("modifier_callbacks", &self.modifier_callbacks.len())
            .field("patterns", &self.patterns.iter().map(Regex::as_str).collect::<Vec<_>>())
            .field("tokens", &self.tokens)
            .field("validation_callbacks", &self.validation_callbacks.len())
            .finish()
    }
}

impl<R: CharsetRule> Sanitizer<R> {
    pub(crate) fn with_rule(rule: R) -> Self {
        Self {
            rule,
            capture_subject: false,
            length: LengthRule::Any,
            modifiers: Vec::new(),
            modifier_callbacks: Vec::new(),
            patterns: Vec::new(),
            tokens: Vec::new(),
            validation_callbacks: Vec::new(),
        }
    }

    pub fn charset(&self) -> Charset {
        self.rule.charset()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn length_rule(&self) -> LengthRule {
        self.length
    }

    /// Attach the offending value to errors
    pub fn capture_subject(mut self, capture: bool) -> Self {
        self.capture_subject = capture;
        self
    }

    /// Apply library configuration
    pub fn configure(self, config: &SanitizerConfig) -> Self {
        self.capture_subject(config.capture_subject_on_error)
    }

    /// Require an exact length, replacing any range
    pub fn length_exact(mut self, exact: usize) -> Self {
        self.length = LengthRule::Exact(exact);
        self
    }

    /// Require a length range, replacing any exact length
    pub fn length_range(mut self, min: usize, max: usize) -> Result<Self, SanitizerConfigError> {
        if min > max {
            return Err(SanitizerConfigError::InvalidLengthRange { min, max });
        }
        self.length = LengthRule::Range { min, max };
        Ok(self)
    }

    /// Append normalization modifiers; repeated modifiers are kept once
    pub fn modifiers<I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = Modifier>,
    {
        let existing = std::mem::take(&mut self.modifiers);
        self.modifiers = unique_modifiers(existing.into_iter().chain(modifiers));
        self
    }

    /// Append patterns that must all match.
    ///
    /// Patterns use Rust regex syntax. A delimited pattern such as `/^[a-z]+$/i`
    /// is also accepted; its flags become inline flags.
    pub fn match_regex<I, S>(mut self, patterns: I) -> Result<Self, SanitizerConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.patterns.push(compile_pattern(pattern.as_ref())?);
        }
        Ok(self)
    }

    /// Append an already compiled pattern
    pub fn match_compiled(mut self, pattern: Regex) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Restrict the final value to one of `tokens`, replacing any previous set
    pub fn exists_in_set<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn callback_modifier<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.modifier_callbacks
            .push(ModifierCallback::Typed(Box::new(callback)));
        self
    }

    /// Modifier callback returning a dynamic value; anything but a string fails
    /// with `MODIFIER_CALLBACK_TYPE_ERROR`
    pub fn callback_modifier_dyn<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.modifier_callbacks
            .push(ModifierCallback::Dynamic(Box::new(callback)));
        self
    }

    pub fn callback_validation<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validation_callbacks
            .push(ValidationCallback::Typed(Box::new(callback)));
        self
    }

    /// Validation callback returning a dynamic value; anything but a boolean
    /// fails with `VALIDATOR_CALLBACK_TYPE_ERROR`
    pub fn callback_validation_dyn<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.validation_callbacks
            .push(ValidationCallback::Dynamic(Box::new(callback)));
        self
    }

    /// Returns `None` for null input, or for an empty string when
    /// `empty_string_null` is set; otherwise behaves like [`Self::get_processed`]
    pub fn get_nullable(&self, value: &Value, empty_string_null: bool) -> SanitizerResult<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if empty_string_null && s.is_empty() => Ok(None),
            other => self.get_processed(other).map(Some),
        }
    }

    /// Sanitize a dynamic value; non-string input fails with `TYPE_ERROR`
    pub fn get_processed(&self, value: &Value) -> SanitizerResult<String> {
        match value {
            Value::String(s) => self.process(s),
            _ => Err(self.reject(SanitizerErrorCode::TypeError, None, None)),
        }
    }

    /// Sanitize a string
    pub fn process(&self, value: &str) -> SanitizerResult<String> {
        let charset = self.rule.charset();

        let mut value = value.to_string();
        for modifier in &self.modifiers {
            value = modifier.apply(&value, charset);
        }

        for (index, callback) in self.modifier_callbacks.iter().enumerate() {
            value = match callback {
                ModifierCallback::Typed(f) => f(&value),
                ModifierCallback::Dynamic(f) => match f(&value) {
                    Value::String(s) => s,
                    _ => {
                        return Err(self.reject(
                            SanitizerErrorCode::ModifierCallbackTypeError,
                            Some(&value),
                            Some(index),
                        ))
                    }
                },
            };
        }

        if !self.rule.accepts(&value) {
            return Err(self.reject(SanitizerErrorCode::CharsetError, Some(&value), None));
        }

        self.check_length(&value, charset)?;

        for (index, pattern) in self.patterns.iter().enumerate() {
            if !pattern.is_match(&value) {
                return Err(self.reject(
                    SanitizerErrorCode::RegexpMatchError,
                    Some(&value),
                    Some(index),
                ));
            }
        }

        if !self.tokens.is_empty() && !self.tokens.iter().any(|t| *t == value) {
            return Err(self.reject(SanitizerErrorCode::EnumError, Some(&value), None));
        }

        for (index, callback) in self.validation_callbacks.iter().enumerate() {
            let passed = match callback {
                ValidationCallback::Typed(f) => f(&value),
                ValidationCallback::Dynamic(f) => match f(&value) {
                    Value::Bool(b) => b,
                    _ => {
                        return Err(self.reject(
                            SanitizerErrorCode::ValidatorCallbackTypeError,
                            Some(&value),
                            Some(index),
                        ))
                    }
                },
            };

            if !passed {
                return Err(self.reject(
                    SanitizerErrorCode::ValidatorCallbackFailed,
                    Some(&value),
                    Some(index),
                ));
            }
        }

        Ok(value)
    }

    fn check_length(&self, value: &str, charset: Charset) -> SanitizerResult<()> {
        let length = charset.len(value);
        match self.length {
            LengthRule::Any => Ok(()),
            LengthRule::Exact(exact) if length != exact => {
                Err(self.reject(SanitizerErrorCode::LengthError, Some(value), None))
            }
            LengthRule::Exact(_) => Ok(()),
            LengthRule::Range { min, .. } if min > 0 && length < min => {
                Err(self.reject(SanitizerErrorCode::LengthUnderflowError, Some(value), None))
            }
            LengthRule::Range { max, .. } if max > 0 && length > max => {
                Err(self.reject(SanitizerErrorCode::LengthOverflowError, Some(value), None))
            }
            LengthRule::Range { .. } => Ok(()),
        }
    }

    fn reject(&self, code: SanitizerErrorCode, subject: Option<&str>, index: Option<usize>) -> SanitizerError {
        log::trace!("sanitizer rejected value: {} (step {:?})", code, index);

        let mut error = SanitizerError::new(code);
        if self.capture_subject {
            error.subject = subject.map(str::to_string);
        }
        error.index = index;
        error
    }
}

/// Compile a Rust regex, or a `/pattern/flags` delimited one
fn compile_pattern(pattern: &str) -> Result<Regex, SanitizerConfigError> {
    let invalid = |message: String| SanitizerConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message,
    };

    let source = match split_delimited(pattern) {
        Some((body, flags)) => {
            let mut inline = String::new();
            for flag in flags.chars() {
                match flag {
                    'i' | 'm' | 's' | 'x' => inline.push(flag),
                    // Unicode mode is always on
                    'u' => {}
                    other => return Err(invalid(format!("unsupported flag '{}'", other))),
                }
            }
            if inline.is_empty() {
                body.to_string()
            } else {
                format!("(?{}){}", inline, body)
            }
        }
        None => pattern.to_string(),
    };

    Regex::new(&source).map_err(|e| invalid(e.to_string()))
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let flags = &rest[end + 1..];
    if flags.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((&rest[..end], flags))
    } else {
        None
    }
}
