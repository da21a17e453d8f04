//! UTF-8 sanitizer

use super::{CharsetRule, Sanitizer};
use crate::charsets::utf8::{self, AllowSet, UnicodeRange};
use shared_types_rs::Charset;

/// Accepts characters from an allow-set of spaces, printable ASCII and
/// Unicode ranges. Empty values never pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Rule {
    pub allowed: AllowSet,
}

impl CharsetRule for Utf8Rule {
    fn charset(&self) -> Charset {
        Charset::Utf8
    }

    fn accepts(&self, value: &str) -> bool {
        utf8::validate(
            value,
            self.allowed.spaces,
            self.allowed.ascii,
            &self.allowed.ranges,
        )
    }
}

pub type Utf8Sanitizer = Sanitizer<Utf8Rule>;

impl Sanitizer<Utf8Rule> {
    pub fn new(allow_ascii: bool, allow_spaces: bool) -> Self {
        Sanitizer::with_rule(Utf8Rule {
            allowed: AllowSet::new(allow_spaces, allow_ascii, &[]),
        })
    }

    /// Add Unicode ranges to the allow-set
    pub fn unicode_ranges<I>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = UnicodeRange>,
    {
        for range in ranges {
            if !self.rule.allowed.ranges.contains(&range) {
                self.rule.allowed.ranges.push(range);
            }
        }
        self
    }

    pub fn allowed(&self) -> &AllowSet {
        &self.rule.allowed
    }
}
