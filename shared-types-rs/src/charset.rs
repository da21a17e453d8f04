//! Supported character sets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character set used to parameterize length counting and case folding.
///
/// `Ascii` operations are byte based, `Utf8` operations are codepoint based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    #[serde(rename = "ASCII")]
    Ascii,
    #[serde(rename = "UTF-8")]
    Utf8,
}

impl Charset {
    /// Canonical name of the charset
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Ascii => "ASCII",
            Charset::Utf8 => "UTF-8",
        }
    }

    /// Length of `value` in this charset: bytes for ASCII, codepoints for UTF-8
    pub fn len(&self, value: &str) -> usize {
        match self {
            Charset::Ascii => value.len(),
            Charset::Utf8 => value.chars().count(),
        }
    }

    /// Lowercase `value`. ASCII only folds `A-Z` and leaves other bytes alone.
    pub fn to_lowercase(&self, value: &str) -> String {
        match self {
            Charset::Ascii => value.to_ascii_lowercase(),
            Charset::Utf8 => value.to_lowercase(),
        }
    }

    /// Uppercase `value`. ASCII only folds `a-z` and leaves other bytes alone.
    pub fn to_uppercase(&self, value: &str) -> String {
        match self {
            Charset::Ascii => value.to_ascii_uppercase(),
            Charset::Utf8 => value.to_uppercase(),
        }
    }
}

impl Default for Charset {
    fn default() -> Self {
        Charset::Ascii
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASCII" => Ok(Charset::Ascii),
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            other => Err(format!("Unsupported charset: {}", other)),
        }
    }
}
