//! UTF-8 allow-set checks
//!
//! A UTF-8 value is accepted when every character falls in the allow-set built
//! from three parts: the plain space (0x20), printable ASCII (0x21..=0x7E),
//! and any number of Unicode script ranges.

use std::ops::RangeInclusive;

/// A block of Unicode codepoints belonging to a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeRange {
    Latin1Supplement,
    LatinExtended,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Devanagari,
    Thai,
    Hangul,
    Hiragana,
    Katakana,
    CjkUnifiedIdeographs,
    /// Any other inclusive codepoint range
    Custom(char, char),
}

impl UnicodeRange {
    pub fn codepoints(&self) -> RangeInclusive<char> {
        match self {
            UnicodeRange::Latin1Supplement => '\u{00C0}'..='\u{00FF}',
            UnicodeRange::LatinExtended => '\u{0100}'..='\u{024F}',
            UnicodeRange::Greek => '\u{0370}'..='\u{03FF}',
            UnicodeRange::Cyrillic => '\u{0400}'..='\u{04FF}',
            UnicodeRange::Armenian => '\u{0530}'..='\u{058F}',
            UnicodeRange::Hebrew => '\u{0590}'..='\u{05FF}',
            UnicodeRange::Arabic => '\u{0600}'..='\u{06FF}',
            UnicodeRange::Devanagari => '\u{0900}'..='\u{097F}',
            UnicodeRange::Thai => '\u{0E00}'..='\u{0E7F}',
            UnicodeRange::Hangul => '\u{AC00}'..='\u{D7AF}',
            UnicodeRange::Hiragana => '\u{3040}'..='\u{309F}',
            UnicodeRange::Katakana => '\u{30A0}'..='\u{30FF}',
            UnicodeRange::CjkUnifiedIdeographs => '\u{4E00}'..='\u{9FFF}',
            UnicodeRange::Custom(start, end) => *start..=*end,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.codepoints().contains(&c)
    }
}

/// The set of characters a UTF-8 value may contain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowSet {
    pub spaces: bool,
    pub ascii: bool,
    pub ranges: Vec<UnicodeRange>,
}

impl AllowSet {
    pub fn new(allow_spaces: bool, allow_ascii: bool, ranges: &[UnicodeRange]) -> Self {
        Self {
            spaces: allow_spaces,
            ascii: allow_ascii,
            ranges: ranges.to_vec(),
        }
    }

    /// True when nothing at all is allowed
    pub fn is_empty(&self) -> bool {
        !self.spaces && !self.ascii && self.ranges.is_empty()
    }

    pub fn allows(&self, c: char) -> bool {
        (self.spaces && c == ' ')
            || (self.ascii && ('\x21'..='\x7E').contains(&c))
            || self.ranges.iter().any(|r| r.contains(c))
    }
}

/// True if `value` is non-empty and made only of allowed characters
pub fn validate(value: &str, allow_spaces: bool, allow_ascii: bool, ranges: &[UnicodeRange]) -> bool {
    let allowed = AllowSet::new(allow_spaces, allow_ascii, ranges);
    if allowed.is_empty() || value.is_empty() {
        return false;
    }
    value.chars().all(|c| allowed.allows(c))
}

/// Remove every character that is not allowed
pub fn filter_out_extras(
    value: &str,
    allow_spaces: bool,
    allow_ascii: bool,
    ranges: &[UnicodeRange],
) -> String {
    let allowed = AllowSet::new(allow_spaces, allow_ascii, ranges);
    if allowed.is_empty() {
        return String::new();
    }
    value.chars().filter(|c| allowed.allows(*c)).collect()
}
