//! Normalization modifiers
//!
//! Modifiers run before any validation rule. Each is charset-aware: ASCII
//! variants work on bytes, UTF-8 variants on Unicode scalar values.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types_rs::Charset;

lazy_static! {
    static ref ASCII_WHITESPACE_RUN: Regex = Regex::new(r"(?-u:\s)+").unwrap();
    static ref UNICODE_WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref UTF8_TRIM_LEFT: Regex = Regex::new(r"^[\p{Z}\p{Cc}\x{FEFF}]+").unwrap();
    static ref UTF8_TRIM_RIGHT: Regex = Regex::new(r"[\p{Z}\p{Cc}\x{FEFF}]+$").unwrap();
}

/// Bytes stripped by the ASCII trim modifiers
const ASCII_TRIM_SET: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Case transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCase {
    Uppercase,
    Lowercase,
    /// ASCII: first byte only. UTF-8: first letter of every word.
    Titlecase,
}

/// Which ends of the string to trim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimStr {
    Both,
    Left,
    Right,
}

/// A normalization step applied by a sanitizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    ChangeCase(ChangeCase),
    /// Collapse whitespace runs into a single space, then trim
    CleanSpaces,
    Trim(TrimStr),
}

impl Modifier {
    pub fn apply(&self, value: &str, charset: Charset) -> String {
        match self {
            Modifier::ChangeCase(case) => change_case(value, *case, charset),
            Modifier::CleanSpaces => clean_spaces(value, charset),
            Modifier::Trim(side) => trim(value, *side, charset),
        }
    }
}

impl From<ChangeCase> for Modifier {
    fn from(case: ChangeCase) -> Self {
        Modifier::ChangeCase(case)
    }
}

impl From<TrimStr> for Modifier {
    fn from(side: TrimStr) -> Self {
        Modifier::Trim(side)
    }
}

/// Drop repeated modifiers, keeping the first occurrence of each
pub fn unique_modifiers<I>(modifiers: I) -> Vec<Modifier>
where
    I: IntoIterator<Item = Modifier>,
{
    let mut unique: Vec<Modifier> = Vec::new();
    for modifier in modifiers {
        if !unique.contains(&modifier) {
            unique.push(modifier);
        }
    }
    unique
}

fn change_case(value: &str, case: ChangeCase, charset: Charset) -> String {
    match case {
        ChangeCase::Uppercase => charset.to_uppercase(value),
        ChangeCase::Lowercase => charset.to_lowercase(value),
        ChangeCase::Titlecase => match charset {
            Charset::Ascii => ascii_ucfirst(value),
            Charset::Utf8 => unicode_title_case(value),
        },
    }
}

fn ascii_ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(value.len());
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

fn unicode_title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if in_word {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        // apostrophes do not start a new word: "it's" -> "It's"
        in_word = c.is_alphanumeric() || (in_word && (c == '\'' || c == '\u{2019}'));
    }

    result
}

fn clean_spaces(value: &str, charset: Charset) -> String {
    let collapsed = match charset {
        Charset::Ascii => ASCII_WHITESPACE_RUN.replace_all(value, " "),
        Charset::Utf8 => UNICODE_WHITESPACE_RUN.replace_all(value, " "),
    };
    trim(&collapsed, TrimStr::Both, charset)
}

fn trim(value: &str, side: TrimStr, charset: Charset) -> String {
    match charset {
        Charset::Ascii => match side {
            TrimStr::Both => value.trim_matches(ASCII_TRIM_SET),
            TrimStr::Left => value.trim_start_matches(ASCII_TRIM_SET),
            TrimStr::Right => value.trim_end_matches(ASCII_TRIM_SET),
        }
        .to_string(),
        Charset::Utf8 => match side {
            TrimStr::Both => {
                let left = UTF8_TRIM_LEFT.replace(value, "");
                UTF8_TRIM_RIGHT.replace(&left, "").into_owned()
            }
            TrimStr::Left => UTF8_TRIM_LEFT.replace(value, "").into_owned(),
            TrimStr::Right => UTF8_TRIM_RIGHT.replace(value, "").into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ChangeCase::Uppercase, Charset::Ascii, "héllo", "HéLLO")]
    #[test_case(ChangeCase::Uppercase, Charset::Utf8, "héllo", "HÉLLO")]
    #[test_case(ChangeCase::Lowercase, Charset::Utf8, "ÉCOLE", "école")]
    #[test_case(ChangeCase::Titlecase, Charset::Ascii, "hello world", "Hello world")]
    #[test_case(ChangeCase::Titlecase, Charset::Utf8, "hello WORLD élan", "Hello World Élan")]
    #[test_case(ChangeCase::Titlecase, Charset::Utf8, "it's", "It's")]
    fn test_change_case(case: ChangeCase, charset: Charset, input: &str, expected: &str) {
        assert_eq!(Modifier::ChangeCase(case).apply(input, charset), expected);
    }

    #[test]
    fn test_clean_spaces() {
        let input = "  Hello \t\n  World  ";
        assert_eq!(Modifier::CleanSpaces.apply(input, Charset::Ascii), "Hello World");
        assert_eq!(Modifier::CleanSpaces.apply(input, Charset::Utf8), "Hello World");
    }

    #[test]
    fn test_trim_ascii() {
        let input = "\0 abc \x0B";
        assert_eq!(Modifier::Trim(TrimStr::Both).apply(input, Charset::Ascii), "abc");
        assert_eq!(Modifier::Trim(TrimStr::Left).apply(input, Charset::Ascii), "abc \x0B");
        assert_eq!(Modifier::Trim(TrimStr::Right).apply(input, Charset::Ascii), "\0 abc");
    }

    #[test]
    fn test_trim_utf8_strips_unicode_separators() {
        let input = "\u{FEFF}\u{00A0} abc\u{3000}";
        assert_eq!(Modifier::Trim(TrimStr::Both).apply(input, Charset::Utf8), "abc");
        assert_eq!(Modifier::Trim(TrimStr::Left).apply(input, Charset::Utf8), "abc\u{3000}");
        // ASCII trim leaves non-ASCII separators alone
        assert_eq!(Modifier::Trim(TrimStr::Both).apply(input, Charset::Ascii), input);
    }

    #[test]
    fn test_unique_modifiers_preserves_first_occurrence() {
        let unique = unique_modifiers([
            Modifier::Trim(TrimStr::Both),
            Modifier::ChangeCase(ChangeCase::Lowercase),
            Modifier::Trim(TrimStr::Both),
            Modifier::Trim(TrimStr::Left),
            Modifier::ChangeCase(ChangeCase::Lowercase),
        ]);

        assert_eq!(
            unique,
            vec![
                Modifier::Trim(TrimStr::Both),
                Modifier::ChangeCase(ChangeCase::Lowercase),
                Modifier::Trim(TrimStr::Left),
            ]
        );
    }
}
