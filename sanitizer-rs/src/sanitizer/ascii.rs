//! ASCII sanitizer

use super::{CharsetRule, Sanitizer};
use crate::charsets::ascii;
use shared_types_rs::Charset;

/// Accepts ASCII, optionally restricted to printable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiRule {
    pub printable_only: bool,
}

impl CharsetRule for AsciiRule {
    fn charset(&self) -> Charset {
        Charset::Ascii
    }

    fn accepts(&self, value: &str) -> bool {
        if self.printable_only {
            ascii::is_printable_only(value)
        } else {
            ascii::in_charset(value)
        }
    }
}

pub type AsciiSanitizer = Sanitizer<AsciiRule>;

impl Sanitizer<AsciiRule> {
    pub fn new(printable_only: bool) -> Self {
        Sanitizer::with_rule(AsciiRule { printable_only })
    }

    pub fn printable_only(&self) -> bool {
        self.rule.printable_only
    }
}

impl Default for Sanitizer<AsciiRule> {
    fn default() -> Self {
        Self::new(true)
    }
}
